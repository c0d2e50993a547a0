//! IP geolocation providers.

use std::net::IpAddr;
use std::path::Path;

use async_trait::async_trait;
use maxminddb::{Reader, geoip2};
use tracing::trace;

use crate::domain::entities::{Location, UNKNOWN};
use crate::domain::enrichment::GeoLocator;

/// Geolocation backed by a local MaxMind City database.
///
/// The database is read into memory once at startup; lookups are pure
/// in-memory tree walks.
pub struct MaxMindLocator {
    reader: Reader<Vec<u8>>,
}

impl MaxMindLocator {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, maxminddb::MaxMindDbError> {
        let reader = Reader::open_readfile(path)?;
        Ok(Self { reader })
    }
}

#[async_trait]
impl GeoLocator for MaxMindLocator {
    async fn locate(&self, ip: IpAddr) -> Option<Location> {
        let result = self.reader.lookup(ip).ok()?;
        let city: geoip2::City = result.decode().ok()??;

        let country = city.country.iso_code.map(str::to_string);
        let region = city
            .subdivisions
            .first()
            .and_then(|subdivision| subdivision.names.english)
            .map(str::to_string);
        let city_name = city.city.names.english.map(str::to_string);

        trace!(%ip, ?country, ?region, city = ?city_name, "MaxMind lookup");

        if country.is_none() && region.is_none() && city_name.is_none() {
            return None;
        }

        Some(Location {
            country: country.unwrap_or_else(|| UNKNOWN.to_string()),
            region: region.unwrap_or_else(|| UNKNOWN.to_string()),
            city: city_name.unwrap_or_else(|| UNKNOWN.to_string()),
        })
    }

    fn name(&self) -> &'static str {
        "MaxMind"
    }
}

/// Locator used when no database is configured. Every lookup misses.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLocator;

#[async_trait]
impl GeoLocator for NullLocator {
    async fn locate(&self, _ip: IpAddr) -> Option<Location> {
        None
    }

    fn name(&self) -> &'static str {
        "none"
    }
}
