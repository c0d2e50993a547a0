//! Fallback for unmatched routes.

use crate::error::AppError;

/// Returns the JSON 404 body for any path no route matched.
pub async fn not_found_handler() -> AppError {
    AppError::RouteNotFound
}
