use crate::domain::review::{
    entity::{Review, ReviewFilter},
    moderation::ModerationResult,
};
use crate::domain::shared::pagination::PaginationRequest;
use crate::infrastructure::geo::request_origin::RequestOrigin;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, TS)]
#[ts(export)]
pub struct SubmitReviewRequest {
    #[validate(length(min = 1, max = 5000, message = "Review text is required"))]
    pub body: String,
}

/// Everything the lifecycle needs to know about one inbound review.
#[derive(Debug, Clone)]
pub struct ReviewSubmission {
    pub body: String,
    /// `None` for anonymous submissions.
    pub author_id: Option<Uuid>,
    pub origin: RequestOrigin,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct SubmitOutcome {
    pub review: Review,
    pub moderation: ModerationResult,
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export)]
pub struct DeleteReviewRequest {
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewListQuery {
    #[serde(default = "default_filter")]
    pub filter: ReviewFilter,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

impl ReviewListQuery {
    pub fn pagination(&self) -> PaginationRequest {
        PaginationRequest {
            page: self.page,
            limit: self.limit,
        }
    }
}

fn default_filter() -> ReviewFilter {
    ReviewFilter::Flagged
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    50
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct ModerationPreviewRequest {
    pub body: String,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct ModerationPreview {
    pub result: ModerationResult,
    pub spam_message: Option<String>,
}
