//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations: it owns the check order of
//! link creation, the lazy expiry rule and the redirect flow. Services
//! consume repository traits and provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link creation, resolution and cleanup
//! - [`services::stats_service::StatsService`] - Click recording and statistics
//! - [`services::enrichment_service::EnrichmentService`] - Client and location derivation
//!
//! [`cleanup_worker::run_cleanup_worker`] drives periodic cleanup.

pub mod cleanup_worker;
pub mod services;
