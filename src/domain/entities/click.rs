//! Click entities: a single recorded visit and its derived metadata.

use chrono::{DateTime, Utc};

/// Placeholder used for any enrichment field that could not be derived.
pub const UNKNOWN: &str = "Unknown";

/// Referer recorded when the request carried none.
pub const DIRECT_REFERER: &str = "Direct";

/// Coarse geographic location derived from a client IP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub country: String,
    pub region: String,
    pub city: String,
}

impl Location {
    pub fn unknown() -> Self {
        Self {
            country: UNKNOWN.to_string(),
            region: UNKNOWN.to_string(),
            city: UNKNOWN.to_string(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.country == UNKNOWN && self.region == UNKNOWN && self.city == UNKNOWN
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::unknown()
    }
}

/// Browser, operating system and device class derived from a user agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    pub browser: String,
    pub os: String,
    pub device: String,
}

impl ClientInfo {
    pub fn new(
        browser: impl Into<String>,
        os: impl Into<String>,
        device: impl Into<String>,
    ) -> Self {
        Self {
            browser: browser.into(),
            os: os.into(),
            device: device.into(),
        }
    }
}

/// One visit to a short URL. Immutable once appended to the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub timestamp: DateTime<Utc>,
    pub client_ip: String,
    pub raw_client_signature: String,
    pub client: ClientInfo,
    pub referer: String,
    pub location: Location,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_location() {
        let location = Location::unknown();

        assert_eq!(location.country, "Unknown");
        assert_eq!(location.region, "Unknown");
        assert_eq!(location.city, "Unknown");
        assert!(location.is_unknown());
        assert_eq!(Location::default(), location);
    }

    #[test]
    fn test_partial_location_is_not_unknown() {
        let location = Location {
            country: "DE".to_string(),
            ..Location::unknown()
        };
        assert!(!location.is_unknown());
    }
}
