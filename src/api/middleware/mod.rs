//! HTTP middleware for request processing and protection.
//!
//! Provides rate limiting and observability middleware.

pub mod access_log;
pub mod rate_limit;
pub mod tracing;
