use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{
    presentation::http::{errors::AppError, middleware::client_ip::ClientIp, state::AppState},
};

/// Refuses requests from blocked addresses with 403.
pub async fn blocked_ip_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ip = ClientIp::from_extensions(request.extensions());
    if state.block_list.contains(ip).await? {
        tracing::warn!(%ip, path = %request.uri().path(), "Request from blocked address refused");
        return Err(AppError::Forbidden(
            "Access denied: your address has been blocked".to_string(),
        ));
    }
    Ok(next.run(request).await)
}
