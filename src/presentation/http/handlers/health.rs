use crate::presentation::http::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    database: &'static str,
    rate_limiter: &'static str,
    version: &'static str,
}

async fn database_status(state: &AppState) -> &'static str {
    match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => "up",
        Err(e) => {
            tracing::error!("Health check failed: Database unreachable: {}", e);
            "down"
        }
    }
}

async fn redis_status(state: &AppState) -> &'static str {
    let mut conn = match state.redis.get_multiplexed_async_connection().await {
        Ok(conn) => conn,
        Err(e) => {
            tracing::warn!("Health check: Redis unreachable: {}", e);
            return "down";
        }
    };
    match redis::cmd("PING").query_async::<String>(&mut conn).await {
        Ok(_) => "up",
        Err(e) => {
            tracing::warn!("Health check: Redis ping failed: {}", e);
            "down"
        }
    }
}

/// Reports `unhealthy` (503) only when Postgres is down. A missing Redis
/// means requests go unthrottled, which is reported as `degraded`.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let (database, rate_limiter) = tokio::join!(database_status(&state), redis_status(&state));

    let (status, code) = match (database, rate_limiter) {
        ("up", "up") => ("healthy", StatusCode::OK),
        ("up", _) => ("degraded", StatusCode::OK),
        _ => ("unhealthy", StatusCode::SERVICE_UNAVAILABLE),
    };

    (
        code,
        Json(HealthResponse {
            status,
            database,
            rate_limiter,
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}
