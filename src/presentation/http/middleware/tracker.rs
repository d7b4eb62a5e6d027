use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::{
    domain::tracker::entity::Visit,
    infrastructure::geo::request_origin::RequestOrigin,
    presentation::http::{middleware::client_ip::ClientIp, state::AppState},
};

const STATIC_PREFIXES: &[&str] = &["/static/", "/assets/", "/favicon"];
const STATIC_SUFFIXES: &[&str] = &[
    ".css", ".js", ".png", ".jpg", ".jpeg", ".gif", ".svg", ".ico", ".webp", ".woff", ".woff2",
    ".map",
];

pub fn is_static_path(path: &str) -> bool {
    STATIC_PREFIXES.iter().any(|p| path.starts_with(p))
        || STATIC_SUFFIXES.iter().any(|s| path.ends_with(s))
}

/// Records one visit per handled request. Recording failures are logged
/// and never affect the response.
pub async fn track_visit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    if !state.config.enable_request_tracking || is_static_path(&path) {
        return next.run(request).await;
    }

    let origin = RequestOrigin::new(
        ClientIp::from_extensions(request.extensions()),
        request.headers(),
    );
    let user_agent = request
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let response = next.run(request).await;

    let visit = Visit {
        ip: origin.ip,
        country: origin.country_name,
        city: origin.city_name,
        route: path,
        user_agent,
        good: response.status().as_u16() < 400,
    };
    if let Err(e) = state.tracker.record(visit).await {
        tracing::warn!(error = %e, "Failed to record visit");
    }

    response
}
