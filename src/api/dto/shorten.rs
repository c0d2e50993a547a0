//! DTOs for the link shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use super::iso_millis;
use crate::application::services::CreatedLink;
use crate::error::AppError;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL. Checked for http(s) and a host by the service.
    #[validate(required, length(min = 1, max = 2048))]
    pub url: Option<String>,

    /// Lifetime in minutes. Kept as raw JSON so a non-integer is reported
    /// as an invalid validity rather than a malformed body.
    #[serde(default)]
    pub validity: Option<Value>,

    /// Optional custom shortcode. An empty string means "generate one".
    #[serde(default)]
    pub shortcode: Option<String>,
}

impl ShortenRequest {
    /// Returns the requested validity, if any.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidValidity`] unless the value is a positive
    /// JSON number with no fractional part (`15` and `15.0` are both fine).
    pub fn validity_minutes(&self) -> Result<Option<i64>, AppError> {
        match &self.validity {
            None => Ok(None),
            Some(value) => value
                .as_i64()
                .or_else(|| {
                    value
                        .as_f64()
                        .filter(|minutes| minutes.fract() == 0.0)
                        .map(|minutes| minutes as i64)
                })
                .filter(|minutes| *minutes > 0)
                .map(Some)
                .ok_or(AppError::InvalidValidity),
        }
    }

    pub fn custom_shortcode(&self) -> Option<&str> {
        self.shortcode.as_deref().filter(|code| !code.is_empty())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub short_link: String,
    #[serde(serialize_with = "iso_millis")]
    pub expiry: DateTime<Utc>,
}

impl From<CreatedLink> for ShortenResponse {
    fn from(link: CreatedLink) -> Self {
        Self {
            short_link: link.short_link,
            expiry: link.expiry,
        }
    }
}
