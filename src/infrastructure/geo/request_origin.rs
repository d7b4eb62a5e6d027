use http::HeaderMap;
use serde::Serialize;
use std::net::{IpAddr, Ipv4Addr};

pub const UNKNOWN: &str = "UNKNOWN";

/// Where a request came from, as reported by the fronting proxy.
///
/// Country and city are used for audit and notification text only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestOrigin {
    pub ip: IpAddr,
    pub country_name: String,
    pub city_name: String,
}

impl Default for RequestOrigin {
    fn default() -> Self {
        Self {
            ip: LOOPBACK,
            country_name: UNKNOWN.to_string(),
            city_name: UNKNOWN.to_string(),
        }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

const LOOPBACK: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

/// The address of the client, given the socket peer and the number of
/// reverse proxies in front of the server.
///
/// With no trusted proxies the peer is the client and forwarding headers
/// are ignored. Otherwise `x-forwarded-for` is walked from the right, one
/// entry per trusted proxy, so entries a client prepends itself are never
/// reached. `x-real-ip` stands in for the chain when `x-forwarded-for` is
/// absent. A missing peer counts as loopback.
pub fn resolve_client_ip(headers: &HeaderMap, peer: Option<IpAddr>, trusted_hops: usize) -> IpAddr {
    let peer = peer.unwrap_or(LOOPBACK);
    if trusted_hops == 0 {
        return peer;
    }

    let forwarded: Vec<IpAddr> = match header_str(headers, "x-forwarded-for") {
        Some(list) => list
            .rsplit(',')
            .map(str::trim)
            .map_while(|hop| hop.parse().ok())
            .collect(),
        None => header_str(headers, "x-real-ip")
            .and_then(|s| s.parse().ok())
            .into_iter()
            .collect(),
    };

    std::iter::once(peer)
        .chain(forwarded)
        .take(trusted_hops + 1)
        .last()
        .unwrap_or(peer)
}

impl RequestOrigin {
    /// Pairs an already resolved client address with the proxy's geo headers.
    pub fn new(ip: IpAddr, headers: &HeaderMap) -> Self {
        Self {
            ip,
            country_name: header_str(headers, "cf-ipcountry")
                .unwrap_or(UNKNOWN)
                .to_string(),
            city_name: header_str(headers, "cf-ipcity")
                .unwrap_or(UNKNOWN)
                .to_string(),
        }
    }

    pub fn is_loopback(&self) -> bool {
        self.ip.is_loopback()
    }
}
