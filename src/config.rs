//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! starts. A `.env` file in the working directory is honored (loaded by
//! `main` through `dotenvy`).
//!
//! ## Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `BASE_URL` - Public origin used to build short links (default: `http://localhost:3000`)
//! - `RUST_LOG` - Log filter (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `DEFAULT_VALIDITY_MINUTES` - Lifetime when a request omits `validity` (default: 30)
//! - `SHORTCODE_LENGTH` - Length of generated shortcodes, 3-20 (default: 6)
//! - `CLEANUP_INTERVAL_SECS` - Expired link sweep period, `0` disables (default: 60)
//! - `BEHIND_PROXY` - Trust `X-Forwarded-For` / `X-Real-IP` for the client address
//!
//! ### Geolocation
//!
//! - `GEOIP_DB_PATH` - MaxMind City database; locations are `Unknown` without it
//! - `GEO_LOOKUP_TIMEOUT_MS` - Upper bound for one lookup (default: 250)
//! - `GEO_CACHE_CAPACITY` - Cached addresses (default: 10000)
//! - `GEO_CACHE_TTL_SECS` - Cache entry lifetime (default: 900)
//!
//! ### External log sink
//!
//! - `LOG_SINK_URL` - Endpoint receiving shipped log entries (disabled if unset)
//! - `LOG_SINK_TOKEN` - Bearer token for the sink
//! - `LOG_SINK_QUEUE_CAPACITY` - Entries buffered before dropping (default: 1000)

use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

use crate::utils::code_generator::{MAX_CODE_LENGTH, MIN_CODE_LENGTH};

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub base_url: String,
    pub log_level: String,
    pub log_format: String,
    pub default_validity_minutes: i64,
    pub shortcode_length: usize,
    /// Seconds between expired link sweeps; `0` turns the sweep off.
    pub cleanup_interval_secs: u64,
    /// When true, the client address is read from X-Forwarded-For / X-Real-IP.
    /// Enable only when the service is behind a trusted reverse proxy.
    pub behind_proxy: bool,

    pub geoip_db_path: Option<String>,
    pub geo_lookup_timeout_ms: u64,
    pub geo_cache_capacity: u64,
    pub geo_cache_ttl_secs: u64,

    pub log_sink_url: Option<String>,
    pub log_sink_token: Option<String>,
    pub log_sink_queue_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3000".to_string(),
            base_url: "http://localhost:3000".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            default_validity_minutes: 30,
            shortcode_length: 6,
            cleanup_interval_secs: 60,
            behind_proxy: false,
            geoip_db_path: None,
            geo_lookup_timeout_ms: 250,
            geo_cache_capacity: 10_000,
            geo_cache_ttl_secs: 900,
            log_sink_url: None,
            log_sink_token: None,
            log_sink_queue_capacity: 1_000,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but does not parse.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let behind_proxy = env::var("BEHIND_PROXY")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        Ok(Self {
            listen_addr: env::var("LISTEN").unwrap_or(defaults.listen_addr),
            base_url: env::var("BASE_URL").unwrap_or(defaults.base_url),
            log_level: env::var("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: env::var("LOG_FORMAT").unwrap_or(defaults.log_format),
            default_validity_minutes: parse_var(
                "DEFAULT_VALIDITY_MINUTES",
                defaults.default_validity_minutes,
            )?,
            shortcode_length: parse_var("SHORTCODE_LENGTH", defaults.shortcode_length)?,
            cleanup_interval_secs: parse_var(
                "CLEANUP_INTERVAL_SECS",
                defaults.cleanup_interval_secs,
            )?,
            behind_proxy,
            geoip_db_path: non_empty_var("GEOIP_DB_PATH"),
            geo_lookup_timeout_ms: parse_var(
                "GEO_LOOKUP_TIMEOUT_MS",
                defaults.geo_lookup_timeout_ms,
            )?,
            geo_cache_capacity: parse_var("GEO_CACHE_CAPACITY", defaults.geo_cache_capacity)?,
            geo_cache_ttl_secs: parse_var("GEO_CACHE_TTL_SECS", defaults.geo_cache_ttl_secs)?,
            log_sink_url: non_empty_var("LOG_SINK_URL"),
            log_sink_token: non_empty_var("LOG_SINK_TOKEN"),
            log_sink_queue_capacity: parse_var(
                "LOG_SINK_QUEUE_CAPACITY",
                defaults.log_sink_queue_capacity,
            )?,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `listen_addr` is not a socket address
    /// - `base_url` is not an absolute http(s) URL
    /// - `log_format` is not `text` or `json`
    /// - `default_validity_minutes` is not positive
    /// - `shortcode_length` is outside 3-20
    /// - a geo setting or the sink queue capacity is zero
    /// - `log_sink_url` is set but is not an http(s) URL
    pub fn validate(&self) -> Result<()> {
        self.listen_addr.parse::<SocketAddr>().with_context(|| {
            format!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            )
        })?;

        ensure_http_url("BASE_URL", &self.base_url)?;

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if self.default_validity_minutes <= 0 {
            anyhow::bail!(
                "DEFAULT_VALIDITY_MINUTES must be positive, got {}",
                self.default_validity_minutes
            );
        }

        if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&self.shortcode_length) {
            anyhow::bail!(
                "SHORTCODE_LENGTH must be between {} and {}, got {}",
                MIN_CODE_LENGTH,
                MAX_CODE_LENGTH,
                self.shortcode_length
            );
        }

        if self.geo_lookup_timeout_ms == 0 {
            anyhow::bail!("GEO_LOOKUP_TIMEOUT_MS must be greater than 0");
        }
        if self.geo_cache_capacity == 0 {
            anyhow::bail!("GEO_CACHE_CAPACITY must be greater than 0");
        }
        if self.geo_cache_ttl_secs == 0 {
            anyhow::bail!("GEO_CACHE_TTL_SECS must be greater than 0");
        }

        if let Some(ref sink) = self.log_sink_url {
            ensure_http_url("LOG_SINK_URL", sink)?;
        }
        if self.log_sink_queue_capacity == 0 {
            anyhow::bail!("LOG_SINK_QUEUE_CAPACITY must be greater than 0");
        }

        Ok(())
    }

    pub fn cleanup_interval(&self) -> Option<Duration> {
        (self.cleanup_interval_secs > 0).then(|| Duration::from_secs(self.cleanup_interval_secs))
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Base URL: {}", self.base_url);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Default validity: {} min", self.default_validity_minutes);
        tracing::info!("  Shortcode length: {}", self.shortcode_length);

        match self.cleanup_interval() {
            Some(every) => tracing::info!("  Cleanup interval: {}s", every.as_secs()),
            None => tracing::info!("  Cleanup: disabled"),
        }

        tracing::info!("  Behind proxy: {}", self.behind_proxy);
        tracing::info!(
            "  GeoIP database: {}",
            self.geoip_db_path.as_deref().unwrap_or("none")
        );

        if let Some(ref sink) = self.log_sink_url {
            tracing::info!(
                "  Log sink: {} (token: {})",
                mask_url(sink),
                if self.log_sink_token.is_some() { "***" } else { "none" }
            );
        } else {
            tracing::info!("  Log sink: disabled");
        }
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} has an invalid value '{raw}'")),
        _ => Ok(default),
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn ensure_http_url(name: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).with_context(|| format!("{name} must be a URL, got '{value}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("{name} must use http or https, got '{value}'");
    }
    Ok(())
}

/// Hides userinfo and query string of a URL for logging.
///
/// `https://user:pw@logs.example/ingest?key=abc` → `https://***@logs.example/ingest?***`
fn mask_url(raw: &str) -> String {
    let Ok(url) = Url::parse(raw) else {
        return "***".to_string();
    };

    let credentials = if url.username().is_empty() && url.password().is_none() {
        ""
    } else {
        "***@"
    };
    let host = url.host_str().unwrap_or_default();
    let port = url.port().map(|p| format!(":{p}")).unwrap_or_default();
    let query = if url.query().is_some() { "?***" } else { "" };

    format!(
        "{}://{}{}{}{}{}",
        url.scheme(),
        credentials,
        host,
        port,
        url.path(),
        query
    )
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable does not parse or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
