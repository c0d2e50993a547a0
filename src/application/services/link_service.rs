//! Short URL creation, resolution and cleanup.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::domain::allocator::ShortcodeAllocator;
use crate::domain::clock::Clock;
use crate::domain::entities::{DEFAULT_VALIDITY_MINUTES, UrlRecord, expiry_after};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::DEFAULT_CODE_LENGTH;
use crate::utils::url_validator::validate_url;

/// Tunables for link creation.
#[derive(Debug, Clone)]
pub struct LinkSettings {
    /// Public origin short links are built on, e.g. `https://sho.rt`.
    pub base_url: String,
    pub default_validity_minutes: i64,
    pub code_length: usize,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            default_validity_minutes: DEFAULT_VALIDITY_MINUTES,
            code_length: DEFAULT_CODE_LENGTH,
        }
    }
}

/// Result of a successful [`LinkService::create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedLink {
    pub shortcode: String,
    pub short_link: String,
    pub expiry: DateTime<Utc>,
}

/// Registry operations on top of a [`LinkRepository`] and the shortcode
/// allocator.
///
/// The allocator's reservation set and the repository's key set move
/// together: a code is reserved before its record is inserted and released
/// only after its record has been removed.
pub struct LinkService<R: LinkRepository> {
    repository: Arc<R>,
    allocator: Arc<ShortcodeAllocator>,
    clock: Arc<dyn Clock>,
    settings: LinkSettings,
}

impl<R: LinkRepository> LinkService<R> {
    pub fn new(
        repository: Arc<R>,
        allocator: Arc<ShortcodeAllocator>,
        clock: Arc<dyn Clock>,
        settings: LinkSettings,
    ) -> Self {
        Self {
            repository,
            allocator,
            clock,
            settings,
        }
    }

    /// Creates a short URL.
    ///
    /// Checks run in order: URL, validity, custom shortcode format, then
    /// reservation. Nothing is reserved unless every input is valid. The
    /// stored destination is the parsed URL's serialization, so it is always
    /// usable as a `Location` header.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] if `original_url` is not an absolute
    ///   http(s) URL
    /// - [`AppError::InvalidValidity`] if `validity_minutes` is given and
    ///   not strictly positive
    /// - [`AppError::InvalidShortcodeFormat`] if `custom_code` does not
    ///   match `^[A-Za-z0-9]{3,20}$`
    /// - [`AppError::ShortcodeTaken`] if `custom_code` is already owned
    pub fn create(
        &self,
        original_url: &str,
        validity_minutes: Option<i64>,
        custom_code: Option<&str>,
    ) -> Result<CreatedLink, AppError> {
        let destination = String::from(validate_url(original_url)?);

        let validity = validity_minutes.unwrap_or(self.settings.default_validity_minutes);
        let created_at = self.clock.now();
        expiry_after(created_at, validity)?;

        let shortcode = match custom_code {
            Some(code) => {
                if !ShortcodeAllocator::validate_format(code) {
                    return Err(AppError::InvalidShortcodeFormat);
                }
                if !self.allocator.reserve(code) {
                    return Err(AppError::ShortcodeTaken);
                }
                code.to_string()
            }
            None => self.allocator.generate(self.settings.code_length)?,
        };

        let record = match UrlRecord::new(
            shortcode.clone(),
            destination,
            created_at,
            validity,
        ) {
            Ok(record) => record,
            Err(e) => {
                self.allocator.release(&shortcode);
                return Err(e);
            }
        };
        let expiry = record.expiry;
        let destination = record.original_url.clone();

        if let Err(e) = self.repository.insert(record) {
            // The reservation belongs to the record that already holds the code.
            if !matches!(e, AppError::ShortcodeTaken) {
                self.allocator.release(&shortcode);
            }
            return Err(e);
        }

        info!(shortcode = %shortcode, url = %destination, "Short URL created");

        Ok(CreatedLink {
            short_link: self.short_link(&shortcode),
            shortcode,
            expiry,
        })
    }

    /// Looks up a live record.
    ///
    /// The first call that observes an expired record flips it inactive;
    /// every call at or past expiry fails.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the shortcode is unknown
    /// - [`AppError::Expired`] if `now` has reached the record's expiry
    pub fn resolve(&self, code: &str) -> Result<UrlRecord, AppError> {
        let record = self.repository.find(code).ok_or(AppError::NotFound)?;

        if record.is_expired_at(self.clock.now()) {
            if self.repository.deactivate(code) {
                warn!(shortcode = %code, "Expired URL accessed");
            }
            return Err(AppError::Expired);
        }

        Ok(record)
    }

    /// Removes every expired record with its click ledger and frees the
    /// shortcodes. Returns the number removed.
    pub fn cleanup_expired(&self) -> usize {
        let removed = self.repository.remove_expired(self.clock.now());

        for code in &removed {
            self.allocator.release(code);
        }

        if !removed.is_empty() {
            info!(count = removed.len(), "Cleaned up expired URLs");
        }

        removed.len()
    }

    /// Builds the externally addressable link for `code`.
    pub fn short_link(&self, code: &str) -> String {
        format!("{}/{}", self.settings.base_url.trim_end_matches('/'), code)
    }

    pub fn active_links(&self) -> usize {
        self.repository.count()
    }
}
