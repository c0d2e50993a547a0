//! Best-effort derivation of client and location metadata for a visit.

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::{debug, trace};

use crate::domain::entities::{ClientInfo, Location, UNKNOWN};
use crate::domain::enrichment::{GeoLocator, SignatureParser};

/// Bounds for the geolocation lookup path.
#[derive(Debug, Clone)]
pub struct GeoSettings {
    pub lookup_timeout: Duration,
    pub cache_capacity: u64,
    pub cache_ttl: Duration,
}

impl Default for GeoSettings {
    fn default() -> Self {
        Self {
            lookup_timeout: Duration::from_millis(250),
            cache_capacity: 10_000,
            cache_ttl: Duration::from_secs(15 * 60),
        }
    }
}

/// Enrichment never fails: every path ends in a value, with `"Unknown"`
/// standing in for whatever could not be derived.
pub struct EnrichmentService {
    parser: Arc<dyn SignatureParser>,
    locator: Arc<dyn GeoLocator>,
    /// IP → location, `None` cached as a negative result.
    cache: Cache<IpAddr, Option<Location>>,
    lookup_timeout: Duration,
}

impl EnrichmentService {
    pub fn new(
        parser: Arc<dyn SignatureParser>,
        locator: Arc<dyn GeoLocator>,
        settings: GeoSettings,
    ) -> Self {
        let cache = Cache::builder()
            .max_capacity(settings.cache_capacity)
            .time_to_live(settings.cache_ttl)
            .build();

        Self {
            parser,
            locator,
            cache,
            lookup_timeout: settings.lookup_timeout,
        }
    }

    /// Structured parse first; substring heuristics when it reports failure.
    pub fn classify_client(&self, raw: &str) -> ClientInfo {
        match self.parser.parse(raw) {
            Ok(info) => info,
            Err(reason) => {
                trace!(%reason, "Falling back to heuristic client classification");
                heuristic_classify(raw)
            }
        }
    }

    /// Resolves `ip` to a location within the configured timeout.
    ///
    /// Concurrent lookups for the same address share one provider call.
    /// Timeouts are not cached, so a slow provider is retried on the next
    /// visit.
    pub async fn geolocate(&self, ip: IpAddr) -> Location {
        if ip.is_loopback() || ip.is_unspecified() {
            return Location::unknown();
        }

        let locator = Arc::clone(&self.locator);
        let lookup = self
            .cache
            .get_with(ip, async move { locator.locate(ip).await });

        match tokio::time::timeout(self.lookup_timeout, lookup).await {
            Ok(Some(location)) => location,
            Ok(None) => Location::unknown(),
            Err(_) => {
                debug!(%ip, provider = self.locator.name(), "Geo lookup timed out");
                Location::unknown()
            }
        }
    }
}

/// Substring classification used when the structured parser gives up.
///
/// Priority is fixed: the first matching token wins.
pub fn heuristic_classify(raw: &str) -> ClientInfo {
    const BROWSERS: [(&str, &str); 4] = [
        ("Chrome", "Chrome"),
        ("Firefox", "Firefox"),
        ("Safari", "Safari"),
        ("Edge", "Edge"),
    ];
    const SYSTEMS: [(&str, &str); 5] = [
        ("Windows", "Windows"),
        ("Mac", "macOS"),
        ("Linux", "Linux"),
        ("Android", "Android"),
        ("iOS", "iOS"),
    ];

    let first_match = |table: &[(&str, &'static str)]| {
        table
            .iter()
            .find(|(needle, _)| raw.contains(needle))
            .map_or(UNKNOWN, |(_, label)| *label)
    };

    let device = if raw.contains("Mobile") {
        "mobile"
    } else if raw.contains("Tablet") {
        "tablet"
    } else {
        "desktop"
    };

    ClientInfo::new(first_match(&BROWSERS), first_match(&SYSTEMS), device)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::enrichment::{MockGeoLocator, MockSignatureParser, SignatureParseError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct SlowLocator;

    #[async_trait]
    impl GeoLocator for SlowLocator {
        async fn locate(&self, _ip: IpAddr) -> Option<Location> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Some(Location {
                country: "NL".into(),
                region: "North Holland".into(),
                city: "Amsterdam".into(),
            })
        }

        fn name(&self) -> &'static str {
            "slow"
        }
    }

    struct CountingLocator(AtomicUsize);

    #[async_trait]
    impl GeoLocator for CountingLocator {
        async fn locate(&self, _ip: IpAddr) -> Option<Location> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Some(Location {
                country: "DE".into(),
                region: "Berlin".into(),
                city: "Berlin".into(),
            })
        }

        fn name(&self) -> &'static str {
            "counting"
        }
    }

    fn failing_parser() -> MockSignatureParser {
        let mut parser = MockSignatureParser::new();
        parser
            .expect_parse()
            .returning(|_| Err(SignatureParseError::Unrecognized));
        parser
    }

    fn missing_locator() -> MockGeoLocator {
        let mut locator = MockGeoLocator::new();
        locator.expect_locate().returning(|_| None);
        locator.expect_name().return_const("mock");
        locator
    }

    fn service(parser: impl SignatureParser + 'static, locator: impl GeoLocator + 'static) -> EnrichmentService {
        EnrichmentService::new(Arc::new(parser), Arc::new(locator), GeoSettings::default())
    }

    #[test]
    fn test_structured_parse_wins() {
        let mut parser = MockSignatureParser::new();
        parser
            .expect_parse()
            .times(1)
            .returning(|_| Ok(ClientInfo::new("Firefox", "Linux", "desktop")));

        let info = service(parser, missing_locator()).classify_client("anything");
        assert_eq!(info, ClientInfo::new("Firefox", "Linux", "desktop"));
    }

    #[test]
    fn test_fallback_on_any_parse_failure() {
        let ua = "Mozilla/5.0 (Windows NT 10.0) Chrome/120.0 Safari/537.36";

        let info = service(failing_parser(), missing_locator()).classify_client(ua);

        assert_eq!(info, ClientInfo::new("Chrome", "Windows", "desktop"));
    }

    #[test]
    fn test_heuristic_priorities() {
        let iphone = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) Version/17.0 Mobile Safari/604.1";
        assert_eq!(heuristic_classify(iphone), ClientInfo::new("Safari", "macOS", "mobile"));

        let tablet = "SomeReader/1.0 (Android 13; Tablet)";
        assert_eq!(heuristic_classify(tablet), ClientInfo::new("Unknown", "Android", "tablet"));

        let edge = "Mozilla/5.0 (X11; Linux x86_64) Edge/18.0";
        assert_eq!(heuristic_classify(edge), ClientInfo::new("Edge", "Linux", "desktop"));
    }

    #[test]
    fn test_heuristic_empty_signature() {
        assert_eq!(heuristic_classify(""), ClientInfo::new("Unknown", "Unknown", "desktop"));
    }

    #[tokio::test]
    async fn test_geolocate_miss_is_unknown() {
        let svc = service(failing_parser(), missing_locator());
        let location = svc.geolocate("203.0.113.7".parse().unwrap()).await;
        assert!(location.is_unknown());
    }

    #[tokio::test]
    async fn test_geolocate_skips_loopback() {
        let mut locator = MockGeoLocator::new();
        locator.expect_locate().times(0);

        let svc = service(failing_parser(), locator);
        assert!(svc.geolocate("127.0.0.1".parse().unwrap()).await.is_unknown());
    }

    #[tokio::test(start_paused = true)]
    async fn test_geolocate_slow_provider_degrades() {
        let svc = service(failing_parser(), SlowLocator);

        let location = svc.geolocate("198.51.100.1".parse().unwrap()).await;

        assert!(location.is_unknown());
    }

    #[tokio::test]
    async fn test_geolocate_caches_results() {
        let locator = Arc::new(CountingLocator(AtomicUsize::new(0)));
        let svc = EnrichmentService::new(
            Arc::new(failing_parser()),
            locator.clone(),
            GeoSettings::default(),
        );
        let ip: IpAddr = "198.51.100.2".parse().unwrap();

        for _ in 0..3 {
            assert_eq!(svc.geolocate(ip).await.city, "Berlin");
        }
        assert_eq!(locator.0.load(Ordering::SeqCst), 1);
    }
}
