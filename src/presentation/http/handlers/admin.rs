use axum::{
    Json,
    extract::{Extension, Query, State},
};
use bcrypt::verify;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{
    application::{
        admin::dto::{DashboardSummary, TrackerAnalytics},
        reviews::dto::{ModerationPreview, ModerationPreviewRequest},
    },
    domain::shared::pagination::PaginationRequest,
    presentation::http::{
        errors::AppError,
        middleware::admin::{AdminClaims, ROLE_ADMIN},
        state::AppState,
    },
};

#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct AdminLoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct AdminLoginResponse {
    pub token: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<AdminLoginRequest>,
) -> Result<Json<AdminLoginResponse>, AppError> {
    if !body.email.trim().eq_ignore_ascii_case(&state.config.admin_email) {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    // Verify password against bcrypt hash
    let valid = verify(&body.password, &state.config.admin_password_hash)
        .map_err(|_| AppError::Internal("Password verification failed".to_string()))?;

    if !valid {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    // Issue JWT valid for 24 hours
    let exp = (chrono::Utc::now() + chrono::Duration::hours(24)).timestamp() as usize;
    let claims = AdminClaims {
        sub: state.config.admin_email.clone(),
        role: ROLE_ADMIN.to_string(),
        exp,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))?;

    tracing::info!("Admin login successful");
    Ok(Json(AdminLoginResponse { token }))
}

pub async fn dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardSummary>, AppError> {
    Ok(Json(state.admin.dashboard().await?))
}

pub async fn tracker_analytics(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationRequest>,
) -> Result<Json<TrackerAnalytics>, AppError> {
    Ok(Json(state.admin.tracker_analytics(pagination).await?))
}

/// Scores text exactly as a submission would be scored, without saving it.
pub async fn moderation_preview(
    State(state): State<AppState>,
    Extension(claims): Extension<AdminClaims>,
    Json(body): Json<ModerationPreviewRequest>,
) -> Json<ModerationPreview> {
    tracing::debug!(admin = %claims.sub, "Moderation preview requested");
    Json(state.reviews.preview(&body.body))
}
