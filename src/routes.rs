//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`                - Liveness probe (not rate limited)
//! - `POST /shorturls`             - Create a short URL
//! - `GET  /shorturls/{shortcode}` - Statistics
//! - `GET  /{shortcode}`           - Redirect
//! - anything else                 - JSON 404
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response spans
//! - **Access log** - One line per request with client details
//! - **Rate limiting** - Per-IP token bucket on the short URL routes
//!
//! Trailing slash normalization is applied around the finished router in
//! [`crate::server`], because it has to run before routing.

use crate::api;
use crate::api::handlers::{health_handler, not_found_handler};
use crate::api::middleware::{access_log, rate_limit, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};

/// Constructs the application router with all routes and middleware.
///
/// Handlers and middleware need `ConnectInfo<SocketAddr>`; serve with
/// `into_make_service_with_connect_info`.
pub fn app_router(state: AppState) -> Router {
    let behind_proxy = state.behind_proxy;

    let public = api::routes::public_routes();
    let public = if behind_proxy {
        public.layer(rate_limit::proxy_layer())
    } else {
        public.layer(rate_limit::layer())
    };

    Router::new()
        .route("/health", get(health_handler))
        .merge(public)
        .fallback(not_found_handler)
        .with_state(state)
        .layer(middleware::from_fn_with_state(
            behind_proxy,
            access_log::access_log,
        ))
        .layer(tracing::layer())
}
