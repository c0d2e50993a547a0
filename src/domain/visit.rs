//! Raw request signals captured for a single redirect.

use std::net::IpAddr;

use super::entities::DIRECT_REFERER;

/// Client metadata taken from a redirect request before enrichment.
///
/// Missing headers are normalized on construction: an absent user agent
/// becomes an empty signature and an absent referer becomes `"Direct"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    pub client_ip: IpAddr,
    pub user_agent: String,
    pub referer: String,
}

impl Visit {
    pub fn new(client_ip: IpAddr, user_agent: Option<&str>, referer: Option<&str>) -> Self {
        Self {
            client_ip,
            user_agent: user_agent.unwrap_or_default().to_string(),
            referer: referer
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .unwrap_or(DIRECT_REFERER)
                .to_string(),
        }
    }
}
