//! Redirect-time click recording and statistics reads.

use std::sync::Arc;

use tracing::info;

use crate::application::services::{EnrichmentService, LinkService};
use crate::domain::clock::Clock;
use crate::domain::entities::{ClickAggregate, ClickEvent, UrlRecord};
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::domain::visit::Visit;
use crate::error::AppError;

/// A record together with its click ledger snapshot.
#[derive(Debug, Clone)]
pub struct DetailedStats {
    pub record: UrlRecord,
    pub aggregate: ClickAggregate,
}

/// Service for recording visits and reading per-shortcode statistics.
///
/// Both flows start with [`LinkService::resolve`], so an unknown or expired
/// shortcode fails before the ledger is touched.
pub struct StatsService<L: LinkRepository, C: ClickRepository> {
    links: Arc<LinkService<L>>,
    clicks: Arc<C>,
    enrichment: Arc<EnrichmentService>,
    clock: Arc<dyn Clock>,
}

impl<L: LinkRepository, C: ClickRepository> StatsService<L, C> {
    pub fn new(
        links: Arc<LinkService<L>>,
        clicks: Arc<C>,
        enrichment: Arc<EnrichmentService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            links,
            clicks,
            enrichment,
            clock,
        }
    }

    /// Resolves `code`, appends an enriched click event and returns the URL
    /// to redirect to.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the shortcode is unknown, or was removed
    ///   between resolution and append
    /// - [`AppError::Expired`] if the record has expired
    pub async fn record_visit(&self, code: &str, visit: Visit) -> Result<String, AppError> {
        let record = self.links.resolve(code)?;

        let client = self.enrichment.classify_client(&visit.user_agent);
        let location = self.enrichment.geolocate(visit.client_ip).await;

        let event = ClickEvent {
            timestamp: self.clock.now(),
            client_ip: visit.client_ip.to_string(),
            raw_client_signature: visit.user_agent,
            client,
            referer: visit.referer,
            location,
        };

        let city = event.location.city.clone();
        let country = event.location.country.clone();
        let total = self.clicks.append(code, event, self.clock.as_ref())?;

        info!(
            shortcode = %code,
            ip = %visit.client_ip,
            %city,
            %country,
            total,
            "URL click recorded"
        );

        Ok(record.original_url)
    }

    /// Returns the record and a snapshot of its clicks.
    ///
    /// # Errors
    ///
    /// Same as [`LinkService::resolve`], plus [`AppError::NotFound`] if the
    /// ledger vanished in a concurrent cleanup.
    pub fn get_statistics(&self, code: &str) -> Result<DetailedStats, AppError> {
        let record = self.links.resolve(code)?;
        let aggregate = self.clicks.snapshot(code)?;

        Ok(DetailedStats { record, aggregate })
    }

    pub fn short_link(&self, code: &str) -> String {
        self.links.short_link(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::{GeoSettings, LinkSettings};
    use crate::domain::allocator::ShortcodeAllocator;
    use crate::domain::clock::ManualClock;
    use crate::domain::entities::Location;
    use crate::domain::repositories::MockClickRepository;
    use crate::infrastructure::analytics::{NullLocator, WootheeParser};
    use crate::infrastructure::memory::MemoryLinkStore;
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 4, 16, 0, 0).unwrap()
    }

    fn enrichment() -> Arc<EnrichmentService> {
        Arc::new(EnrichmentService::new(
            Arc::new(WootheeParser::new()),
            Arc::new(NullLocator),
            GeoSettings::default(),
        ))
    }

    fn setup() -> (
        StatsService<MemoryLinkStore, MemoryLinkStore>,
        Arc<LinkService<MemoryLinkStore>>,
        Arc<ManualClock>,
    ) {
        let clock = Arc::new(ManualClock::new(t0()));
        let store = Arc::new(MemoryLinkStore::new());
        let links = Arc::new(LinkService::new(
            Arc::clone(&store),
            Arc::new(ShortcodeAllocator::new()),
            clock.clone(),
            LinkSettings::default(),
        ));
        let stats = StatsService::new(Arc::clone(&links), store, enrichment(), clock.clone());
        (stats, links, clock)
    }

    fn visit(referer: Option<&str>) -> Visit {
        Visit::new(
            "10.1.2.3".parse().unwrap(),
            Some("Mozilla/5.0 (X11; Linux x86_64; rv:125.0) Gecko/20100101 Firefox/125.0"),
            referer,
        )
    }

    #[tokio::test]
    async fn test_record_visit_appends_enriched_event() {
        let (stats, links, clock) = setup();
        links.create("https://example.com", None, Some("abc123")).unwrap();

        clock.advance(TimeDelta::seconds(5));
        let target = stats.record_visit("abc123", visit(None)).await.unwrap();
        assert_eq!(target, "https://example.com/");

        let detail = stats.get_statistics("abc123").unwrap();
        assert_eq!(detail.aggregate.total_clicks, 1);

        let event = &detail.aggregate.events[0];
        assert_eq!(event.timestamp, t0() + TimeDelta::seconds(5));
        assert_eq!(event.client_ip, "10.1.2.3");
        assert_eq!(event.referer, "Direct");
        assert_eq!(event.client.browser, "Firefox");
        assert_eq!(event.client.device, "desktop");
        assert_eq!(event.location, Location::unknown());
    }

    #[tokio::test]
    async fn test_events_keep_call_order() {
        let (stats, links, _) = setup();
        links.create("https://example.com", None, Some("order")).unwrap();

        for referer in ["https://a.test", "https://b.test", "https://c.test"] {
            stats.record_visit("order", visit(Some(referer))).await.unwrap();
        }

        let detail = stats.get_statistics("order").unwrap();
        let referers: Vec<_> = detail.aggregate.events.iter().map(|e| e.referer.as_str()).collect();
        assert_eq!(referers, ["https://a.test", "https://b.test", "https://c.test"]);
        assert_eq!(detail.aggregate.total_clicks, 3);
    }

    #[tokio::test]
    async fn test_unknown_and_expired_codes() {
        let (stats, links, clock) = setup();
        links.create("https://example.com", Some(1), Some("brief")).unwrap();

        assert!(matches!(
            stats.record_visit("nope", visit(None)).await,
            Err(AppError::NotFound)
        ));

        clock.advance(TimeDelta::minutes(1));
        assert!(matches!(
            stats.record_visit("brief", visit(None)).await,
            Err(AppError::Expired)
        ));
        assert!(matches!(stats.get_statistics("brief"), Err(AppError::Expired)));
    }

    #[tokio::test]
    async fn test_ledger_error_propagates() {
        let clock = Arc::new(ManualClock::new(t0()));
        let links = Arc::new(LinkService::new(
            Arc::new(MemoryLinkStore::new()),
            Arc::new(ShortcodeAllocator::new()),
            clock.clone(),
            LinkSettings::default(),
        ));
        links.create("https://example.com", None, Some("gone")).unwrap();

        let mut clicks = MockClickRepository::new();
        clicks
            .expect_append()
            .times(1)
            .returning(|_, _, _| Err(AppError::NotFound));

        let stats = StatsService::new(links, Arc::new(clicks), enrichment(), clock);

        assert!(matches!(
            stats.record_visit("gone", visit(None)).await,
            Err(AppError::NotFound)
        ));
    }
}
