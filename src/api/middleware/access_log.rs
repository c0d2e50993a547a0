//! One log line per request, in combined-log style.

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use std::{net::SocketAddr, time::Instant};

use crate::utils::client_ip::client_ip;

/// Logs client IP, method, path, status, referer, user agent and duration.
///
/// Client errors and server errors are logged at `WARN`, everything else
/// at `INFO`. Install with `middleware::from_fn_with_state(behind_proxy, ..)`.
pub async fn access_log(
    State(behind_proxy): State<bool>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request,
    next: Next,
) -> Response {
    let start = Instant::now();

    let ip = client_ip(req.headers(), addr.ip(), behind_proxy);
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let ua = header_or_dash(req.headers(), header::USER_AGENT);
    let referer = header_or_dash(req.headers(), header::REFERER);

    let response = next.run(req).await;

    let status = response.status();
    let ms = start.elapsed().as_millis();

    if status.is_client_error() || status.is_server_error() {
        tracing::warn!(
            r#"{ip} "{method} {path}" {status} "{referer}" "{ua}" {ms}ms"#,
            status = status.as_u16(),
        );
    } else {
        tracing::info!(
            r#"{ip} "{method} {path}" {status} "{referer}" "{ua}" {ms}ms"#,
            status = status.as_u16(),
        );
    }

    response
}

fn header_or_dash(headers: &HeaderMap, name: header::HeaderName) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string()
}
