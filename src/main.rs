use anyhow::Context;
use short_url_service::config::{self, Config};
use short_url_service::infrastructure::log_shipping::LogShipLayer;
use short_url_service::server;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real deployments use the environment.
    let _ = dotenvy::dotenv();

    let config = config::load_from_env().context("invalid configuration")?;

    init_tracing(&config)?;
    config.print_summary();

    server::run(config).await
}

/// Installs the global subscriber: `EnvFilter` + text or JSON formatter,
/// plus the log sink layer when `LOG_SINK_URL` is set.
fn init_tracing(config: &Config) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(&config.log_level)
        .with_context(|| format!("invalid RUST_LOG filter '{}'", config.log_level))?;

    let fmt_layer = if config.log_format == "json" {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    let sink_layer = config
        .log_sink_url
        .clone()
        .map(|url| {
            LogShipLayer::spawn(
                url,
                config.log_sink_token.clone(),
                config.log_sink_queue_capacity,
            )
        })
        .transpose()?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(sink_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(())
}
