//! Per-client rate limiting using the token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// One token is returned to the bucket every this many seconds, so a full
/// bucket refills in 15 minutes.
const REPLENISH_EVERY_SECS: u64 = 9;

/// Requests a single client may make back to back.
const BURST_SIZE: u32 = 100;

/// Creates the rate limiter keyed by the socket peer address.
///
/// # Limits
///
/// - **Burst**: 100 requests
/// - **Refill**: one request every 9 seconds (100 per 15 minutes)
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
pub fn layer() -> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>
{
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(REPLENISH_EVERY_SECS)
            .burst_size(BURST_SIZE)
            .finish()
            .expect("rate limit constants are non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

/// Same limits as [`layer`], keyed by the client address reported by a
/// reverse proxy (`X-Forwarded-For`, `X-Real-IP`, `Forwarded`), falling back
/// to the peer address.
///
/// Only use when every request passes through a trusted proxy.
pub fn proxy_layer()
-> GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(REPLENISH_EVERY_SECS)
            .burst_size(BURST_SIZE)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .expect("rate limit constants are non-zero"),
    );

    GovernorLayer::new(governor_conf)
}
