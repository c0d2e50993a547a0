//! Handler for detailed link statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns link metadata and every recorded click.
///
/// # Endpoint
///
/// `GET /shorturls/{shortcode}`
///
/// # Errors
///
/// - 404 if the shortcode does not exist
/// - 410 if the short URL has expired
pub async fn stats_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>, AppError> {
    let stats = state.stats_service.get_statistics(&code)?;
    let short_link = state.stats_service.short_link(&code);

    Ok(Json(StatsResponse::new(stats, short_link)))
}
