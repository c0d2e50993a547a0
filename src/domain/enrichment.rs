//! Collaborator contracts for best-effort visit enrichment.
//!
//! Implementations live in `crate::infrastructure::analytics`. Neither
//! contract may panic or block indefinitely; failure is expressed in the
//! return type and the caller substitutes a fallback.

use std::net::IpAddr;

use async_trait::async_trait;

use super::entities::{ClientInfo, Location};

/// Why a structured user-agent parse produced nothing usable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureParseError {
    #[error("empty client signature")]
    Empty,

    #[error("client signature not recognized")]
    Unrecognized,
}

/// Structured parser turning a raw user agent into [`ClientInfo`].
#[cfg_attr(test, mockall::automock)]
pub trait SignatureParser: Send + Sync {
    fn parse(&self, raw: &str) -> Result<ClientInfo, SignatureParseError>;
}

/// IP geolocation source.
///
/// Returns `None` when the address is not in the database or the lookup
/// failed for any reason.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeoLocator: Send + Sync {
    async fn locate(&self, ip: IpAddr) -> Option<Location>;

    /// Provider name used in logs.
    fn name(&self) -> &'static str;
}
