//! Handler for link shortening endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::url_validator::validate_url;

/// Creates a short URL.
///
/// # Endpoint
///
/// `POST /shorturls`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/some/long/path",
///   "validity": 30,        // optional, minutes
///   "shortcode": "abc123"  // optional, 3-20 alphanumeric characters
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "shortLink": "http://localhost:3000/abc123",
///   "expiry": "2025-01-01T12:30:00.000Z"
/// }
/// ```
///
/// # Errors
///
/// - 400 for a missing/invalid URL, invalid validity, invalid shortcode
///   format or an unreadable body, checked in that order
/// - 409 if the custom shortcode is already taken
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(request) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    request.validate()?;
    let url = request.url.as_deref().ok_or(AppError::InvalidUrl)?;
    validate_url(url)?;
    let validity = request.validity_minutes()?;

    let created = state
        .link_service
        .create(url, validity, request.custom_shortcode())?;

    Ok((StatusCode::CREATED, Json(created.into())))
}
