use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    domain::post::entity::{NewPost, Post, PostUpdate},
    presentation::http::{errors::AppError, state::AppState},
};

pub async fn create_post(
    State(state): State<AppState>,
    Json(body): Json<NewPost>,
) -> Result<(StatusCode, Json<Post>), AppError> {
    let post = state.posts.create(body).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<PostUpdate>,
) -> Result<Json<Post>, AppError> {
    Ok(Json(state.posts.update(id, body).await?))
}

pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.posts.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
