//! Shortcode allocator: the reservation set guarding code uniqueness.
//!
//! A code is either free or reserved. Reservation is a single atomic
//! insert into a sharded set, so two concurrent callers can never both
//! claim the same code.

use dashmap::DashSet;
use tracing::warn;

use crate::error::AppError;
use crate::utils::code_generator::{generate_code, is_valid_shortcode};

/// Upper bound on random draws before giving up on a crowded code space.
const MAX_GENERATE_ATTEMPTS: usize = 1_000;

#[derive(Debug, Default)]
pub struct ShortcodeAllocator {
    reserved: DashSet<String>,
}

impl ShortcodeAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws random `[A-Za-z0-9]` codes of `length` until one can be
    /// reserved, and returns it already reserved.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unexpected`] if no free code was found within
    /// the attempt budget.
    pub fn generate(&self, length: usize) -> Result<String, AppError> {
        for attempt in 1..=MAX_GENERATE_ATTEMPTS {
            let code = generate_code(length);

            if self.reserved.insert(code.clone()) {
                if attempt > 1 {
                    tracing::debug!(attempt, "Shortcode generated after collisions");
                }
                return Ok(code);
            }
        }

        warn!(length, "Shortcode space exhausted");
        Err(AppError::unexpected(format!(
            "no free shortcode of length {length} after {MAX_GENERATE_ATTEMPTS} attempts"
        )))
    }

    /// Reserves `code` if it is free. Returns `false` without side effects
    /// if it is already taken.
    pub fn reserve(&self, code: &str) -> bool {
        self.reserved.insert(code.to_string())
    }

    pub fn is_available(&self, code: &str) -> bool {
        !self.reserved.contains(code)
    }

    /// Returns a code to the free pool. Only called once the record that
    /// owned it is gone.
    pub fn release(&self, code: &str) -> bool {
        self.reserved.remove(code).is_some()
    }

    pub fn validate_format(code: &str) -> bool {
        is_valid_shortcode(code)
    }

    pub fn reserved_count(&self) -> usize {
        self.reserved.len()
    }
}
