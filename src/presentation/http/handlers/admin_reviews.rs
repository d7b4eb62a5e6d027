use axum::{
    Json,
    extract::{Extension, Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    application::reviews::dto::{DeleteReviewRequest, ReviewListQuery},
    domain::{
        review::entity::{Review, ReviewDetails},
        shared::pagination::PaginatedResponse,
    },
    presentation::http::{errors::AppError, middleware::admin::AdminClaims, state::AppState},
};

pub async fn list_reviews(
    State(state): State<AppState>,
    Query(query): Query<ReviewListQuery>,
) -> Result<Json<PaginatedResponse<ReviewDetails>>, AppError> {
    let page = state
        .reviews
        .list_reviews(query.filter, query.pagination())
        .await?;
    Ok(Json(page))
}

pub async fn approve_review(
    State(state): State<AppState>,
    Extension(claims): Extension<AdminClaims>,
    Path(id): Path<Uuid>,
) -> Result<Json<Review>, AppError> {
    let review = state.reviews.approve(id).await?;
    tracing::info!(admin = %claims.sub, review_id = %id, "Admin approved review");
    Ok(Json(review))
}

/// The body is optional; an empty request deletes without a reason.
pub async fn delete_review(
    State(state): State<AppState>,
    Extension(claims): Extension<AdminClaims>,
    Path(id): Path<Uuid>,
    body: Option<Json<DeleteReviewRequest>>,
) -> Result<StatusCode, AppError> {
    let reason = body.and_then(|Json(b)| b.reason);
    state.reviews.delete_with_reason(id, reason).await?;
    tracing::info!(admin = %claims.sub, review_id = %id, "Admin deleted review");
    Ok(StatusCode::NO_CONTENT)
}
