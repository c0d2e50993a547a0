//! Repository trait for the URL registry.

use chrono::{DateTime, Utc};

use crate::domain::entities::UrlRecord;
use crate::error::AppError;

/// Storage contract for shortcode → [`UrlRecord`] mappings.
///
/// Inserting a record also creates its empty click aggregate, and removing
/// it drops the aggregate in the same step, so the registry and the ledger
/// are never observed out of step.
///
/// # Implementations
///
/// - [`crate::infrastructure::memory::MemoryLinkStore`] - in-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
pub trait LinkRepository: Send + Sync {
    /// Stores a new record together with an empty click aggregate.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ShortcodeTaken`] if the shortcode is already
    /// present. Never overwrites.
    fn insert(&self, record: UrlRecord) -> Result<(), AppError>;

    /// Returns a snapshot of the record, if present.
    fn find(&self, code: &str) -> Option<UrlRecord>;

    /// Marks the record inactive.
    ///
    /// Returns `true` only for the call that performed the transition, so
    /// repeated expiry observations are idempotent.
    fn deactivate(&self, code: &str) -> bool;

    /// Removes every record expired at `now` along with its aggregate and
    /// returns the removed shortcodes.
    fn remove_expired(&self, now: DateTime<Utc>) -> Vec<String>;

    /// Number of live records.
    fn count(&self) -> usize;
}
