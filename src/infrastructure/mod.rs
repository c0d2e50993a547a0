//! Infrastructure layer for external integrations.
//!
//! This layer implements the contracts defined by the domain layer: storage
//! for links and clicks, enrichment providers, and the external log sink.
//!
//! # Modules
//!
//! - [`memory`] - In-process registry and click ledger
//! - [`analytics`] - User-agent parsing and IP geolocation
//! - [`log_shipping`] - `tracing` layer forwarding events to an HTTP sink

pub mod analytics;
pub mod log_shipping;
pub mod memory;
