//! Handler for health check endpoint.

use axum::Json;
use chrono::{SecondsFormat, Utc};

use crate::api::dto::health::HealthResponse;

/// Liveness probe. Always 200; touches no shared state.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// ```json
/// {
///   "status": "OK",
///   "service": "short-url-service",
///   "timestamp": "2025-01-01T12:00:00.000Z",
///   "version": "0.1.0"
/// }
/// ```
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        service: env!("CARGO_PKG_NAME"),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        version: env!("CARGO_PKG_VERSION"),
    })
}
