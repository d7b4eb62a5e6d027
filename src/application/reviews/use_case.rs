use super::dto::{ModerationPreview, ReviewSubmission, SubmitOutcome};
use crate::domain::{
    blocklist::repository::BlockListStore,
    post::repository::PostRepository,
    review::{
        entity::{NewReview, Review, ReviewDetails, ReviewFilter},
        moderation::Disposition,
        repository::ReviewRepository,
    },
    shared::{
        errors::DomainError,
        pagination::{PaginatedResponse, PaginationRequest},
    },
    user::entity::ANONYMOUS_USER_ID,
};
use crate::infrastructure::{
    geo::request_origin::RequestOrigin,
    notifications::{NotificationSender, dispatch},
    security::content_filter::ContentFilter,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Review lifecycle: submission through scoring and persistence, then
/// admin approval or removal.
///
/// A review is on its post's visible list exactly when it is not flagged.
/// The repository keeps that true atomically; this type decides which
/// side of the line a review lands on.
pub struct ReviewModerationUseCase {
    reviews: Arc<dyn ReviewRepository>,
    posts: Arc<dyn PostRepository>,
    block_list: Arc<dyn BlockListStore>,
    notifier: Arc<dyn NotificationSender>,
    filter: ContentFilter,
    site_name: String,
}

impl ReviewModerationUseCase {
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        posts: Arc<dyn PostRepository>,
        block_list: Arc<dyn BlockListStore>,
        notifier: Arc<dyn NotificationSender>,
        filter: ContentFilter,
        site_name: String,
    ) -> Self {
        Self {
            reviews,
            posts,
            block_list,
            notifier,
            filter,
            site_name,
        }
    }

    fn notify(&self, subject: &str, body: String, recipient: Option<String>) {
        let subject = format!("[{}] {}", self.site_name, subject);
        dispatch(self.notifier.clone(), subject, body, recipient);
    }

    #[instrument(skip(self, submission), fields(ip = %submission.origin.ip))]
    pub async fn submit(
        &self,
        post_id: Uuid,
        submission: ReviewSubmission,
    ) -> Result<SubmitOutcome, DomainError> {
        let post = self
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Post {}", post_id)))?;

        let moderation = self.filter.validate_review(&submission.body);
        if moderation.sanitized_body.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "Review text is required".to_string(),
            ));
        }

        let disposition = moderation.disposition;
        let ip = submission.origin.ip;
        let review = self
            .reviews
            .create(
                NewReview {
                    post_id,
                    body: moderation.sanitized_body.clone(),
                    author_id: submission.author_id.unwrap_or(ANONYMOUS_USER_ID),
                    is_flagged: disposition.is_flagged(),
                    flag_reason: moderation.flag_reason(),
                    spam_score: moderation.score,
                    ip_address: Some(ip),
                    user_agent: submission.user_agent.clone(),
                },
                !disposition.is_flagged(),
            )
            .await?;

        match disposition {
            Disposition::Accept => {
                info!(review_id = %review.id, score = moderation.score, "Review accepted");
            }
            Disposition::Flag => {
                warn!(review_id = %review.id, score = moderation.score, "Review flagged");
            }
            Disposition::Block => {
                warn!(review_id = %review.id, score = moderation.score, "Review blocked");
                if submission.origin.is_loopback() {
                    warn!("Spam from a loopback address; not adding it to the block list");
                } else if self.block_list.add(ip, moderation.flag_reason()).await? {
                    info!(%ip, "Address added to block list");
                }
            }
        }

        if disposition.is_flagged() {
            let subject = format!("Review flagged for spam on \"{}\"", post.title);
            let body = format!(
                "Post: {}\nScore: {}\nDisposition: {:?}\nReasons: {}\nFrom: {} ({}, {})\n\n{}",
                post.title,
                moderation.score,
                disposition,
                moderation.reasons.join(", "),
                submission.origin.ip,
                submission.origin.city_name,
                submission.origin.country_name,
                moderation.sanitized_body,
            );
            self.notify(&subject, body, None);
        }

        Ok(SubmitOutcome {
            review,
            message: disposition.submitter_message().to_string(),
            moderation,
        })
    }

    #[instrument(skip(self))]
    pub async fn approve(&self, review_id: Uuid) -> Result<Review, DomainError> {
        let review = self
            .reviews
            .find_by_id(review_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Review {}", review_id)))?;

        if self.posts.find_by_id(review.post_id).await?.is_none() {
            return Err(DomainError::NotFound(format!("Post {}", review.post_id)));
        }

        let approved = self.reviews.approve(review_id).await?;
        info!(review_id = %review_id, post_id = %approved.post_id, "Review approved");
        Ok(approved)
    }

    /// Admin removal. The author is told why, unless they are anonymous or
    /// have no email on file.
    #[instrument(skip(self, reason))]
    pub async fn delete_with_reason(
        &self,
        review_id: Uuid,
        reason: Option<String>,
    ) -> Result<(), DomainError> {
        let details = self
            .reviews
            .find_details(review_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Review {}", review_id)))?;

        self.reviews.delete(review_id).await?;
        info!(review_id = %review_id, "Review deleted by admin");

        if details.author_id == ANONYMOUS_USER_ID {
            return Ok(());
        }
        let Some(email) = details.author_email.filter(|e| !e.is_empty()) else {
            return Ok(());
        };

        let post_title = details.post_title.unwrap_or_default();
        let reason = reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| "No reason given".to_string());
        let body = format!(
            "Your review on \"{}\" was removed by a moderator.\n\nReason: {}\n\nYour review:\n{}",
            post_title, reason, details.body
        );
        self.notify("Your review was removed", body, Some(email));
        Ok(())
    }

    /// Removal by the review's own author. The admin is told what was removed.
    #[instrument(skip(self, origin))]
    pub async fn delete_by_author(
        &self,
        post_id: Uuid,
        review_id: Uuid,
        user_id: Uuid,
        origin: RequestOrigin,
    ) -> Result<(), DomainError> {
        let review = self
            .reviews
            .find_by_id(review_id)
            .await?
            .filter(|r| r.post_id == post_id)
            .ok_or_else(|| DomainError::NotFound(format!("Review {}", review_id)))?;

        if user_id == ANONYMOUS_USER_ID || review.author_id != user_id {
            return Err(DomainError::Unauthorized);
        }

        self.reviews.delete(review_id).await?;
        info!(review_id = %review_id, "Review deleted by author");

        let post_title = self
            .posts
            .find_by_id(post_id)
            .await
            .ok()
            .flatten()
            .map(|p| p.title)
            .unwrap_or_default();
        let body = format!(
            "Post: {}\nFrom: {} ({}, {})\n\n{}",
            post_title, origin.ip, origin.city_name, origin.country_name, review.body
        );
        self.notify("A review was deleted by its author", body, None);
        Ok(())
    }

    pub async fn list_reviews(
        &self,
        filter: ReviewFilter,
        pagination: PaginationRequest,
    ) -> Result<PaginatedResponse<ReviewDetails>, DomainError> {
        let pagination = pagination.normalized();
        let items = self
            .reviews
            .list(filter, pagination.limit, pagination.offset())
            .await?;
        let total = self.reviews.count(filter).await?;
        Ok(PaginatedResponse::new(items, total, pagination))
    }

    pub async fn visible_reviews(&self, post_id: Uuid) -> Result<Vec<ReviewDetails>, DomainError> {
        self.reviews.list_visible_for_post(post_id).await
    }

    /// Scores text without persisting anything.
    pub fn preview(&self, body: &str) -> ModerationPreview {
        let result = self.filter.validate_review(body);
        let spam_message = result.spam_error_message();
        ModerationPreview {
            result,
            spam_message,
        }
    }
}
