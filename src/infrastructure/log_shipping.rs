//! Forwarding of application log events to an external HTTP log sink.
//!
//! [`LogShipLayer`] is a `tracing_subscriber` layer. It turns each event
//! emitted by this crate into a [`LogEntry`] and hands it to a bounded
//! channel drained by a background `reqwest` worker. Shipping is strictly
//! fire-and-forget: a full queue, a slow sink or a failed POST drops the
//! entry and never reaches the code that emitted it.

use std::fmt;
use std::time::Duration;

use anyhow::Context;
use reqwest::Client;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context as LayerContext;

const STACK: &str = "backend";
const CRATE_TARGET: &str = env!("CARGO_CRATE_NAME");
const SINK_TIMEOUT: Duration = Duration::from_secs(5);

/// One log line as accepted by the sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub stack: &'static str,
    pub level: &'static str,
    pub package: &'static str,
    pub message: String,
}

#[derive(Clone)]
pub struct LogShipLayer {
    tx: mpsc::Sender<LogEntry>,
}

impl LogShipLayer {
    /// Builds the HTTP client and spawns the delivery worker.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn(url: String, token: Option<String>, capacity: usize) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(SINK_TIMEOUT)
            .build()
            .context("failed to build HTTP client for log shipping")?;

        let (tx, rx) = mpsc::channel(capacity.max(1));
        tokio::spawn(deliver(client, url, token, rx));

        Ok(Self { tx })
    }

    #[cfg(test)]
    pub(crate) fn with_sender(tx: mpsc::Sender<LogEntry>) -> Self {
        Self { tx }
    }
}

async fn deliver(
    client: Client,
    url: String,
    token: Option<String>,
    mut rx: mpsc::Receiver<LogEntry>,
) {
    while let Some(entry) = rx.recv().await {
        let mut request = client.post(&url).json(&entry);
        if let Some(token) = &token {
            request = request.bearer_auth(token);
        }

        // Failures are only visible locally; this module is excluded from shipping.
        match request.send().await {
            Ok(response) if !response.status().is_success() => {
                tracing::debug!(status = %response.status(), "Log sink rejected entry");
            }
            Ok(_) => {}
            Err(e) => tracing::debug!(error = %e, "Log sink unreachable"),
        }
    }
}

impl<S: Subscriber> Layer<S> for LogShipLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: LayerContext<'_, S>) {
        let target = event.metadata().target();
        if !target.starts_with(CRATE_TARGET) || target.starts_with(module_path!()) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let entry = LogEntry {
            stack: STACK,
            level: level_name(event.metadata().level()),
            package: package_for_target(target),
            message: visitor.finish(),
        };

        // Full or closed queue: drop.
        let _ = self.tx.try_send(entry);
    }
}

/// Collects the `message` field followed by any structured fields.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: Vec<String>,
}

impl MessageVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            return self.message;
        }
        let fields = self.fields.join(" ");
        if self.message.is_empty() {
            fields
        } else {
            format!("{} {}", self.message, fields)
        }
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields.push(format!("{}={:?}", field.name(), value));
        }
    }
}

fn level_name(level: &Level) -> &'static str {
    if *level == Level::ERROR {
        "error"
    } else if *level == Level::WARN {
        "warn"
    } else if *level == Level::INFO {
        "info"
    } else {
        "debug"
    }
}

/// Maps a module path onto the sink's package vocabulary.
fn package_for_target(target: &str) -> &'static str {
    let layer = target
        .strip_prefix(CRATE_TARGET)
        .and_then(|rest| rest.strip_prefix("::"))
        .and_then(|rest| rest.split("::").next())
        .unwrap_or_default();

    match layer {
        "api" => "handler",
        "application" => "service",
        "domain" => "domain",
        "infrastructure" => "repository",
        "config" => "config",
        "server" | "routes" | "state" => "route",
        _ => "service",
    }
}
