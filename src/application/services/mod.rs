//! Business logic services for the application layer.

pub mod enrichment_service;
pub mod link_service;
pub mod stats_service;

pub use enrichment_service::{EnrichmentService, GeoSettings, heuristic_classify};
pub use link_service::{CreatedLink, LinkService, LinkSettings};
pub use stats_service::{DetailedStats, StatsService};
