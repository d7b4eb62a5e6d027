use axum::{
    Json,
    Extension,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    application::reviews::dto::{ReviewSubmission, SubmitOutcome, SubmitReviewRequest},
    infrastructure::geo::request_origin::RequestOrigin,
    presentation::http::{
        errors::AppError,
        middleware::{
            client_ip::ClientIp,
            user::{decode_required_user_claims, optional_user_id},
        },
        state::AppState,
    },
};

pub async fn submit_review(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    Extension(ClientIp(ip)): Extension<ClientIp>,
    headers: HeaderMap,
    Json(body): Json<SubmitReviewRequest>,
) -> Result<(StatusCode, Json<SubmitOutcome>), AppError> {
    body.validate()?;

    let submission = ReviewSubmission {
        body: body.body,
        author_id: optional_user_id(&headers, &state.config.jwt_secret),
        origin: RequestOrigin::new(ip, &headers),
        user_agent: headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    };

    let outcome = state.reviews.submit(post_id, submission).await?;
    let status = if outcome.review.is_flagged {
        StatusCode::ACCEPTED
    } else {
        StatusCode::CREATED
    };
    Ok((status, Json(outcome)))
}

pub async fn delete_own_review(
    State(state): State<AppState>,
    Path((post_id, review_id)): Path<(Uuid, Uuid)>,
    Extension(ClientIp(ip)): Extension<ClientIp>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let claims = decode_required_user_claims(&headers, &state.config.jwt_secret)?;
    let user_id = claims
        .user_id()
        .ok_or_else(|| AppError::Unauthorized("Invalid token subject".to_string()))?;

    state
        .reviews
        .delete_by_author(
            post_id,
            review_id,
            user_id,
            RequestOrigin::new(ip, &headers),
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
