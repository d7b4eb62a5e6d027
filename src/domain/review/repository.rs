use super::entity::{NewReview, Review, ReviewDetails, ReviewFilter};
use crate::domain::shared::errors::DomainError;
use async_trait::async_trait;
use uuid::Uuid;

/// Review persistence. Every method that touches both a review and its
/// post's visible list does so atomically.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Inserts the review. With `publish`, the review is also appended to
    /// its post's visible list in the same transaction.
    async fn create(&self, review: NewReview, publish: bool) -> Result<Review, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>, DomainError>;
    async fn find_details(&self, id: Uuid) -> Result<Option<ReviewDetails>, DomainError>;
    /// Clears the flag and lists the review on its post. Listing an
    /// already visible review leaves the list unchanged.
    async fn approve(&self, id: Uuid) -> Result<Review, DomainError>;
    /// Removes the review and any list entry pointing at it.
    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
    async fn list(
        &self,
        filter: ReviewFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ReviewDetails>, DomainError>;
    async fn count(&self, filter: ReviewFilter) -> Result<i64, DomainError>;
    async fn list_visible_for_post(&self, post_id: Uuid) -> Result<Vec<ReviewDetails>, DomainError>;
}
