//! Public API route table.

use crate::api::handlers::{redirect_handler, shorten_handler, stats_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Short URL routes. None of them require authentication.
///
/// # Endpoints
///
/// - `POST /shorturls`              - Create a short URL
/// - `GET  /shorturls/{shortcode}`  - Statistics for a short URL
/// - `GET  /{shortcode}`            - Record a click and redirect
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/shorturls", post(shorten_handler))
        .route("/shorturls/{shortcode}", get(stats_handler))
        .route("/{shortcode}", get(redirect_handler))
}
