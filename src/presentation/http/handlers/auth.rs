use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use bcrypt::{DEFAULT_COST, hash, verify};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

use crate::{
    application::accounts::dto::{DeleteAccountRequest, UpdateDetailsRequest},
    domain::user::entity::{NewUser, User},
    presentation::http::{
        errors::AppError,
        middleware::user::{UserClaims, decode_required_user_claims},
        state::AppState,
    },
};

#[derive(Debug, Deserialize, Validate, TS)]
#[ts(export)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 64, message = "Username must be 3 to 64 characters"))]
    pub username: String,
    #[validate(email(message = "Valid email is required"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

fn issue_user_token(state: &AppState, user: &User) -> Result<String, AppError> {
    let exp = (chrono::Utc::now() + chrono::Duration::days(7)).timestamp() as usize;
    let claims = UserClaims {
        sub: user.id.to_string(),
        username: user.username.clone(),
        role: user.role.clone(),
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    body.validate()?;

    let password_hash = hash(&body.password, DEFAULT_COST)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

    let user = state
        .users
        .create(NewUser {
            username: body.username.trim().to_string(),
            email: body.email.trim().to_lowercase(),
            password_hash,
        })
        .await?;
    tracing::info!(user_id = %user.id, "User registered");

    let token = issue_user_token(&state, &user)?;
    Ok(Json(AuthResponse { token, user }))
}

pub async fn login_user(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let email = body.email.trim().to_lowercase();
    if email.is_empty() {
        return Err(AppError::BadRequest("Email is required".to_string()));
    }

    let user = state
        .users
        .find_by_email(email)
        .await?
        .filter(|u| !u.is_anonymous())
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    let valid = verify(&body.password, &user.password_hash)
        .map_err(|_| AppError::Internal("Password verification failed".to_string()))?;
    if !valid {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    let token = issue_user_token(&state, &user)?;
    Ok(Json(AuthResponse { token, user }))
}

fn current_user_id(state: &AppState, headers: &HeaderMap) -> Result<uuid::Uuid, AppError> {
    let claims = decode_required_user_claims(headers, &state.config.jwt_secret)?;
    claims
        .user_id()
        .ok_or_else(|| AppError::Unauthorized("Invalid token subject".to_string()))
}

pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<User>, AppError> {
    let user_id = current_user_id(&state, &headers)?;

    let user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

    Ok(Json(user))
}

/// Returns a fresh token, since the username is part of the claims.
pub async fn update_me(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<UpdateDetailsRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    body.validate()?;
    let user_id = current_user_id(&state, &headers)?;

    let user = state.accounts.update_details(user_id, body).await?;
    let token = issue_user_token(&state, &user)?;
    Ok(Json(AuthResponse { token, user }))
}

pub async fn delete_me(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<DeleteAccountRequest>,
) -> Result<StatusCode, AppError> {
    body.validate()?;
    let user_id = current_user_id(&state, &headers)?;

    state.accounts.delete_account(user_id, &body.password).await?;
    Ok(StatusCode::NO_CONTENT)
}
