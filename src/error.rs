//! Application error type and its HTTP mapping.
//!
//! Every failure the core can produce is one [`AppError`] variant. The HTTP
//! boundary turns it into a status code plus a stable, user-facing message;
//! internal detail carried by [`AppError::Unexpected`] is logged, never sent.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use validator::ValidationErrors;

use crate::utils::url_validator::UrlValidationError;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serialized error payload: `{"code": "...", "message": "..."}`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: &'static str,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("invalid URL")]
    InvalidUrl,

    #[error("invalid shortcode format")]
    InvalidShortcodeFormat,

    #[error("shortcode already taken")]
    ShortcodeTaken,

    #[error("invalid validity period")]
    InvalidValidity,

    #[error("shortcode not found")]
    NotFound,

    #[error("short URL has expired")]
    Expired,

    /// The request body could not be read as the expected JSON document.
    #[error("malformed request: {0}")]
    BadRequest(String),

    #[error("route not found")]
    RouteNotFound,

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn unexpected(reason: impl Into<String>) -> Self {
        Self::Unexpected(reason.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidUrl
            | AppError::InvalidShortcodeFormat
            | AppError::InvalidValidity
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::ShortcodeTaken => StatusCode::CONFLICT,
            AppError::NotFound | AppError::RouteNotFound => StatusCode::NOT_FOUND,
            AppError::Expired => StatusCode::GONE,
            AppError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidUrl => "invalid_url",
            AppError::InvalidShortcodeFormat => "invalid_shortcode_format",
            AppError::ShortcodeTaken => "shortcode_taken",
            AppError::InvalidValidity => "invalid_validity",
            AppError::NotFound => "not_found",
            AppError::Expired => "expired",
            AppError::BadRequest(_) => "bad_request",
            AppError::RouteNotFound => "route_not_found",
            AppError::Unexpected(_) => "internal_error",
        }
    }

    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::InvalidUrl => "Please provide a valid absolute http(s) URL",
            AppError::InvalidShortcodeFormat => "Shortcode must be 3-20 alphanumeric characters",
            AppError::ShortcodeTaken => "Shortcode already exists, please choose a different one",
            AppError::InvalidValidity => "Validity must be a positive integer number of minutes",
            AppError::NotFound => "The requested shortcode does not exist",
            AppError::Expired => "The requested short URL has expired",
            AppError::BadRequest(_) => "Request body must be a valid JSON object",
            AppError::RouteNotFound => "The requested endpoint does not exist",
            AppError::Unexpected(_) => "An unexpected error occurred",
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        ErrorInfo {
            code: self.code(),
            message: self.public_message(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Unexpected(reason) => tracing::error!(reason = %reason, "Request failed"),
            AppError::BadRequest(reason) => tracing::debug!(reason = %reason, "Malformed request"),
            other => tracing::debug!(error = %other, "Request rejected"),
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let fields = errors.field_errors();

        if fields.contains_key("url") {
            AppError::InvalidUrl
        } else {
            AppError::BadRequest(errors.to_string())
        }
    }
}

impl From<UrlValidationError> for AppError {
    fn from(error: UrlValidationError) -> Self {
        tracing::debug!(%error, "Rejected URL");
        AppError::InvalidUrl
    }
}
