use super::entity::{NewPost, Post, PostSort, PostUpdate};
use crate::domain::shared::errors::DomainError;
use async_trait::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, post: NewPost) -> Result<Post, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, DomainError>;
    async fn find_all(&self, sort: PostSort) -> Result<Vec<Post>, DomainError>;
    /// Most recently created first.
    async fn recent(&self, limit: i64) -> Result<Vec<Post>, DomainError>;
    async fn update(&self, id: Uuid, update: PostUpdate) -> Result<Post, DomainError>;
    /// Deletes the post together with all of its reviews.
    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
    async fn count(&self) -> Result<i64, DomainError>;
}
