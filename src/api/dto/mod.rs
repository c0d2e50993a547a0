//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. Field names are camelCase on the wire and
//! timestamps are ISO-8601 UTC with millisecond precision.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serializer;

pub mod clicks;
pub mod health;
pub mod shorten;
pub mod stats;

/// Renders a timestamp as `2025-01-01T12:00:00.000Z`.
pub fn iso_millis<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
}
