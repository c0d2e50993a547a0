//! Handler for short URL redirect.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Redirect},
};
use tracing::debug;

use crate::domain::visit::Visit;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_ip;

/// Records a click and redirects to the original URL.
///
/// # Endpoint
///
/// `GET /{shortcode}`
///
/// # Request Flow
///
/// 1. Resolve the shortcode (lazy expiry check)
/// 2. Derive client, device and location metadata from the request
/// 3. Append the click to the shortcode's ledger
/// 4. Return 307 Temporary Redirect
///
/// The click is recorded before the response is sent, so a subsequent
/// statistics read always includes it.
///
/// # Errors
///
/// - 404 if the shortcode does not exist
/// - 410 if the short URL has expired
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    let ip = client_ip(&headers, addr.ip(), state.behind_proxy);

    let visit = Visit::new(
        ip,
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok()),
        headers.get(header::REFERER).and_then(|v| v.to_str().ok()),
    );

    let original_url = state.stats_service.record_visit(&code, visit).await?;

    debug!(shortcode = %code, target = %original_url, "Redirecting");

    Ok(Redirect::temporary(&original_url))
}
