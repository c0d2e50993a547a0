//! Periodic sweep of expired links.
//!
//! Expiry is enforced on read, so the sweep only reclaims memory. It runs
//! until the shutdown channel flips to `true` or its sender is dropped.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::application::services::LinkService;
use crate::domain::repositories::LinkRepository;

pub async fn run_cleanup_worker<R: LinkRepository>(
    links: Arc<LinkService<R>>,
    every: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // First tick fires immediately; nothing can have expired yet.
    ticker.tick().await;

    info!(interval_secs = every.as_secs(), "Cleanup worker started");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let removed = links.cleanup_expired();
                debug!(removed, live = links.active_links(), "Cleanup pass finished");
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    info!("Cleanup worker stopped");
}
