//! DTOs for detailed link statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::clicks::ClickInfo;
use super::iso_millis;
use crate::application::services::DetailedStats;

/// Link metadata plus every recorded click, oldest first.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub shortcode: String,
    pub original_url: String,
    pub short_link: String,
    #[serde(serialize_with = "iso_millis")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "iso_millis")]
    pub expiry: DateTime<Utc>,
    pub is_active: bool,
    pub total_clicks: u64,
    pub clicks: Vec<ClickInfo>,
}

impl StatsResponse {
    pub fn new(stats: DetailedStats, short_link: String) -> Self {
        let DetailedStats { record, aggregate } = stats;

        Self {
            shortcode: record.shortcode,
            original_url: record.original_url,
            short_link,
            created_at: record.created_at,
            expiry: record.expiry,
            is_active: record.is_active,
            total_clicks: aggregate.total_clicks,
            clicks: aggregate.events.into_iter().map(ClickInfo::from).collect(),
        }
    }
}
