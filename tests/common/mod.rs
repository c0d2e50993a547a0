#![allow(dead_code)]

use axum::{Router, extract::ConnectInfo};
use chrono::{DateTime, TimeZone, Utc};
use short_url_service::api::routes::public_routes;
use short_url_service::application::services::{GeoSettings, LinkSettings};
use short_url_service::domain::clock::ManualClock;
use short_url_service::infrastructure::analytics::NullLocator;
use short_url_service::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::Layer;

pub const BASE_URL: &str = "http://sho.rt";

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
}

/// State over a fresh store, driven by a clock the test controls.
pub fn create_test_state() -> (AppState, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(t0()));
    let state = AppState::new(
        clock.clone(),
        Arc::new(NullLocator),
        LinkSettings {
            base_url: BASE_URL.to_string(),
            ..LinkSettings::default()
        },
        GeoSettings::default(),
        false,
    );
    (state, clock)
}

/// Public routes without rate limiting, with a fake peer address.
pub fn test_app(state: AppState) -> Router {
    public_routes()
        .layer(MockConnectInfoLayer::default())
        .with_state(state)
}

/// Inserts `ConnectInfo` the way `into_make_service_with_connect_info` would.
#[derive(Clone)]
pub struct MockConnectInfoLayer(pub SocketAddr);

impl Default for MockConnectInfoLayer {
    fn default() -> Self {
        Self("127.0.0.1:12345".parse().unwrap())
    }
}

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService {
            inner,
            addr: self.0,
        }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
    addr: SocketAddr,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        req.extensions_mut().insert(ConnectInfo(self.addr));
        self.inner.call(req)
    }
}
