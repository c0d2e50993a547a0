//! Repository trait for the click ledger.

use crate::domain::clock::Clock;
use crate::domain::entities::{ClickAggregate, ClickEvent};
use crate::error::AppError;

/// Append-only per-shortcode visit log.
///
/// Appends to one shortcode are serialized and land in call order; appends
/// to different shortcodes proceed independently.
#[cfg_attr(test, mockall::automock)]
pub trait ClickRepository: Send + Sync {
    /// Appends `event` and returns the new total click count.
    ///
    /// `event.timestamp` is replaced by `clock.now()` read while the
    /// shortcode's ledger is held, so ledger order is timestamp order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no aggregate exists for `code`.
    fn append(&self, code: &str, event: ClickEvent, clock: &dyn Clock) -> Result<u64, AppError>;

    /// Returns a consistent copy of the aggregate.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no aggregate exists for `code`.
    fn snapshot(&self, code: &str) -> Result<ClickAggregate, AppError>;
}
