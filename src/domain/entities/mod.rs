//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures with only the invariants that belong
//! to them (expiry arithmetic, append bookkeeping).
//!
//! # Entity Types
//!
//! - [`UrlRecord`] - A shortcode → URL mapping with its expiry window
//! - [`ClickEvent`] - One recorded visit with derived client/location metadata
//! - [`ClickAggregate`] - The per-shortcode ledger of visits

pub mod click;
pub mod click_aggregate;
pub mod url_record;

pub use click::{ClickEvent, ClientInfo, DIRECT_REFERER, Location, UNKNOWN};
pub use click_aggregate::ClickAggregate;
pub use url_record::{DEFAULT_VALIDITY_MINUTES, UrlRecord, expiry_after};
