use axum::{
    extract::{ConnectInfo, Request, State},
    http::Extensions,
    middleware::Next,
    response::Response,
};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::{
    infrastructure::geo::request_origin::resolve_client_ip, presentation::http::state::AppState,
};

/// The resolved client address, stored in request extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientIp(pub IpAddr);

impl ClientIp {
    /// The address set by [`client_ip_middleware`], or loopback outside it.
    pub fn from_extensions(extensions: &Extensions) -> IpAddr {
        extensions
            .get::<ClientIp>()
            .map(|c| c.0)
            .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
    }
}

/// Resolves the client address once per request from the socket peer and
/// the configured number of trusted proxy hops.
pub async fn client_ip_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());
    let ip = resolve_client_ip(request.headers(), peer, state.config.trusted_proxy_hops);
    request.extensions_mut().insert(ClientIp(ip));
    next.run(request).await
}
