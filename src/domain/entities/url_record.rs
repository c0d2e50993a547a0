//! URL record entity representing one shortcode → URL mapping.

use chrono::{DateTime, TimeDelta, Utc};

use crate::error::AppError;

/// Default lifetime of a short URL when the caller does not specify one.
pub const DEFAULT_VALIDITY_MINUTES: i64 = 30;

/// A shortened URL with its expiry window.
///
/// Owned by the registry. Everything except `is_active` is fixed at creation;
/// `is_active` only ever moves from `true` to `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub shortcode: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expiry: DateTime<Utc>,
    pub validity_minutes: i64,
    pub is_active: bool,
}

impl UrlRecord {
    /// Creates an active record expiring `validity_minutes` after `created_at`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidValidity`] if `validity_minutes` is not
    /// strictly positive or the expiry would fall outside the representable
    /// time range.
    pub fn new(
        shortcode: String,
        original_url: String,
        created_at: DateTime<Utc>,
        validity_minutes: i64,
    ) -> Result<Self, AppError> {
        let expiry = expiry_after(created_at, validity_minutes)?;

        Ok(Self {
            shortcode,
            original_url,
            created_at,
            expiry,
            validity_minutes,
            is_active: true,
        })
    }

    /// Returns true once `now` has reached the expiry instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expiry
    }
}

/// Computes `created_at + validity_minutes`, rejecting non-positive or
/// overflowing durations.
pub fn expiry_after(
    created_at: DateTime<Utc>,
    validity_minutes: i64,
) -> Result<DateTime<Utc>, AppError> {
    if validity_minutes <= 0 {
        return Err(AppError::InvalidValidity);
    }

    TimeDelta::try_minutes(validity_minutes)
        .and_then(|delta| created_at.checked_add_signed(delta))
        .ok_or(AppError::InvalidValidity)
}
