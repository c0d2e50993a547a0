//! Domain layer containing business entities and contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Registry and ledger storage contracts
//! - [`enrichment`] - User-agent parser and geolocation contracts
//! - [`allocator`] - Shortcode reservation set
//! - [`clock`] - Wall-clock time source
//! - [`visit`] - Raw request signals captured on redirect
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Traits define contracts implemented by the infrastructure layer
//! - Business logic is orchestrated in [`crate::application::services`]
//!
//! # Redirect Flow
//!
//! 1. HTTP handler builds a [`visit::Visit`] from the request
//! 2. The registry resolves the shortcode and enforces expiry
//! 3. The visit is enriched into a [`entities::ClickEvent`]
//! 4. The event is appended to the shortcode's ledger

pub mod allocator;
pub mod clock;
pub mod enrichment;
pub mod entities;
pub mod repositories;
pub mod visit;
