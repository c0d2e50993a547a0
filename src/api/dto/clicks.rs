//! DTOs for click event data.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::iso_millis;
use crate::domain::entities::{ClickEvent, Location};

/// One recorded visit as exposed by the statistics endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickInfo {
    #[serde(serialize_with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
    pub ip: String,
    pub user_agent: String,
    pub browser: String,
    pub os: String,
    pub device: String,
    pub referer: String,
    pub location: LocationInfo,
}

#[derive(Debug, Serialize)]
pub struct LocationInfo {
    pub country: String,
    pub region: String,
    pub city: String,
}

impl From<Location> for LocationInfo {
    fn from(location: Location) -> Self {
        Self {
            country: location.country,
            region: location.region,
            city: location.city,
        }
    }
}

impl From<ClickEvent> for ClickInfo {
    fn from(event: ClickEvent) -> Self {
        Self {
            timestamp: event.timestamp,
            ip: event.client_ip,
            user_agent: event.raw_client_signature,
            browser: event.client.browser,
            os: event.client.os,
            device: event.client.device,
            referer: event.referer,
            location: event.location.into(),
        }
    }
}
