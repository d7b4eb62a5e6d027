use axum::{
    Json,
    extract::{Path, Query, State},
};
use uuid::Uuid;

use crate::{
    application::posts::dto::{PostListQuery, PostWithReviews},
    domain::post::entity::Post,
    presentation::http::{errors::AppError, state::AppState},
};

pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PostListQuery>,
) -> Result<Json<Vec<Post>>, AppError> {
    Ok(Json(state.posts.list(query.sort).await?))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PostWithReviews>, AppError> {
    Ok(Json(state.posts.show(id).await?))
}
