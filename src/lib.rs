//! # Short URL Service
//!
//! An in-memory URL shortening microservice built with Axum: expiring short
//! links, custom or generated shortcodes, and per-visit click analytics.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Entities, the shortcode allocator and collaborator traits
//! - **Application Layer** ([`application`]) - Registry, redirect and enrichment services
//! - **Infrastructure Layer** ([`infrastructure`]) - In-memory store, UA/GeoIP providers, log shipping
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Custom shortcodes with atomic reservation, or random 6-character codes
//! - Lazy expiry on read, plus an optional periodic sweep
//! - Per-shortcode click ledger with browser/OS/device and coarse location
//! - Per-IP rate limiting and structured logging with optional log shipping
//!
//! ## Quick Start
//!
//! ```bash
//! export BASE_URL="https://sho.rt"            # Optional
//! export GEOIP_DB_PATH="./GeoLite2-City.mmdb" # Optional
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        CreatedLink, EnrichmentService, GeoSettings, LinkService, LinkSettings, StatsService,
    };
    pub use crate::domain::clock::{Clock, ManualClock, SystemClock};
    pub use crate::domain::entities::{ClickAggregate, ClickEvent, Location, UrlRecord};
    pub use crate::error::AppError;
    pub use crate::routes::app_router;
    pub use crate::state::AppState;
}
