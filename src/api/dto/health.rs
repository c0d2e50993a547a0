//! DTOs for health check endpoint.

use serde::Serialize;

/// Liveness probe body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub timestamp: String,
    pub version: &'static str,
}
