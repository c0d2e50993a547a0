//! Shared application state injected into every handler.

use std::sync::Arc;
use std::time::Duration;

use crate::application::services::{
    EnrichmentService, GeoSettings, LinkService, LinkSettings, StatsService,
};
use crate::config::Config;
use crate::domain::allocator::ShortcodeAllocator;
use crate::domain::clock::{Clock, SystemClock};
use crate::domain::enrichment::GeoLocator;
use crate::infrastructure::analytics::{MaxMindLocator, NullLocator, WootheeParser};
use crate::infrastructure::memory::MemoryLinkStore;

pub type Links = LinkService<MemoryLinkStore>;
pub type Stats = StatsService<MemoryLinkStore, MemoryLinkStore>;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<Links>,
    pub stats_service: Arc<Stats>,
    /// Read the client address from proxy headers.
    pub behind_proxy: bool,
}

impl AppState {
    /// Wires one in-memory store, allocator and clock into both services.
    pub fn new(
        clock: Arc<dyn Clock>,
        locator: Arc<dyn GeoLocator>,
        link_settings: LinkSettings,
        geo_settings: GeoSettings,
        behind_proxy: bool,
    ) -> Self {
        let store = Arc::new(MemoryLinkStore::new());
        let allocator = Arc::new(ShortcodeAllocator::new());

        let link_service = Arc::new(LinkService::new(
            Arc::clone(&store),
            allocator,
            Arc::clone(&clock),
            link_settings,
        ));

        let enrichment = Arc::new(EnrichmentService::new(
            Arc::new(WootheeParser::new()),
            locator,
            geo_settings,
        ));

        let stats_service = Arc::new(StatsService::new(
            Arc::clone(&link_service),
            store,
            enrichment,
            clock,
        ));

        Self {
            link_service,
            stats_service,
            behind_proxy,
        }
    }

    /// Builds production state from configuration.
    ///
    /// A missing or unreadable GeoIP database is not fatal: locations are
    /// then always `Unknown`.
    pub fn from_config(config: &Config) -> Self {
        let locator: Arc<dyn GeoLocator> = match config.geoip_db_path {
            Some(ref path) => match MaxMindLocator::open(path) {
                Ok(locator) => {
                    tracing::info!("GeoIP: using MaxMind database at {}", path);
                    Arc::new(locator)
                }
                Err(e) => {
                    tracing::warn!("GeoIP: failed to load {}: {}. Locations disabled.", path, e);
                    Arc::new(NullLocator)
                }
            },
            None => {
                tracing::info!("GeoIP: no database configured, locations disabled");
                Arc::new(NullLocator)
            }
        };

        let link_settings = LinkSettings {
            base_url: config.base_url.clone(),
            default_validity_minutes: config.default_validity_minutes,
            code_length: config.shortcode_length,
        };

        let geo_settings = GeoSettings {
            lookup_timeout: Duration::from_millis(config.geo_lookup_timeout_ms),
            cache_capacity: config.geo_cache_capacity,
            cache_ttl: Duration::from_secs(config.geo_cache_ttl_secs),
        };

        Self::new(
            Arc::new(SystemClock),
            locator,
            link_settings,
            geo_settings,
            config.behind_proxy,
        )
    }
}
