use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{
    presentation::http::{
        errors::AppError,
        middleware::{client_ip::ClientIp, user::optional_user_id},
        state::AppState,
    },
};

/// Per-IP limit on every request.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ip = ClientIp::from_extensions(request.extensions());
    if ip.is_loopback() {
        return Ok(next.run(request).await);
    }

    let key = format!("general:{}", ip);
    let allowed = state
        .rate_limiter
        .check(
            &key,
            state.config.general_rate_limit,
            state.config.general_rate_limit_window_seconds,
        )
        .await;
    if !allowed {
        tracing::warn!(%ip, "General rate limit exceeded");
        return Err(AppError::RateLimited);
    }

    Ok(next.run(request).await)
}

/// Limit on review submissions, keyed by account when signed in and by
/// address otherwise.
pub async fn review_rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ip = ClientIp::from_extensions(request.extensions());
    let key = match optional_user_id(request.headers(), &state.config.jwt_secret) {
        Some(user_id) => format!("review:user:{}", user_id),
        None if ip.is_loopback() => return Ok(next.run(request).await),
        None => format!("review:ip:{}", ip),
    };

    let allowed = state
        .rate_limiter
        .check(
            &key,
            state.config.review_rate_limit,
            state.config.review_rate_limit_window_seconds,
        )
        .await;
    if !allowed {
        tracing::warn!(key = %key, "Review rate limit exceeded");
        return Err(AppError::RateLimited);
    }

    Ok(next.run(request).await)
}
