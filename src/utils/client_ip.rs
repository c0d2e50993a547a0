//! Client IP extraction from request headers.

use axum::http::HeaderMap;
use std::net::IpAddr;

/// Determines the visitor's IP address.
///
/// Without a trusted proxy the socket peer address is authoritative. Behind
/// one trusted reverse proxy, the address that proxy appended last to
/// `X-Forwarded-For` is used, then `X-Real-IP`, then the peer address.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.2".parse().unwrap());
///
/// let ip = client_ip(&headers, "10.0.0.1".parse().unwrap(), true);
/// assert_eq!(ip, "10.0.0.2".parse::<IpAddr>().unwrap());
/// ```
pub fn client_ip(headers: &HeaderMap, peer: IpAddr, behind_proxy: bool) -> IpAddr {
    if !behind_proxy {
        return peer;
    }

    forwarded_for(headers)
        .or_else(|| real_ip(headers))
        .unwrap_or(peer)
}

fn forwarded_for(headers: &HeaderMap) -> Option<IpAddr> {
    headers
        .get("x-forwarded-for")?
        .to_str()
        .ok()?
        .rsplit(',')
        .find_map(|hop| hop.trim().parse::<IpAddr>().ok())
}

fn real_ip(headers: &HeaderMap) -> Option<IpAddr> {
    headers
        .get("x-real-ip")?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn peer() -> IpAddr {
        "192.168.1.1".parse().unwrap()
    }

    #[test]
    fn test_peer_address_without_proxy() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.1"));

        assert_eq!(client_ip(&headers, peer(), false), peer());
    }

    #[test]
    fn test_rightmost_forwarded_hop_behind_proxy() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.1, 198.51.100.1"),
        );

        assert_eq!(
            client_ip(&headers, peer(), true),
            "198.51.100.1".parse::<IpAddr>().unwrap()
        );
    }

    #[test]
    fn test_skips_unparseable_hops() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.1, unknown"),
        );

        assert_eq!(
            client_ip(&headers, peer(), true),
            "203.0.113.1".parse::<IpAddr>().unwrap()
        );
    }

    #[test]
    fn test_real_ip_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("2001:db8::1"));

        assert_eq!(
            client_ip(&headers, peer(), true),
            "2001:db8::1".parse::<IpAddr>().unwrap()
        );
    }

    #[test]
    fn test_peer_fallback_behind_proxy() {
        assert_eq!(client_ip(&HeaderMap::new(), peer(), true), peer());
    }
}
