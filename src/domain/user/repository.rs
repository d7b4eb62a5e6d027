use super::entity::{NewUser, User};
use crate::domain::shared::errors::DomainError;
use async_trait::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `ValidationError` when the username or email is taken.
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;
    async fn find_by_email(&self, email: String) -> Result<Option<User>, DomainError>;
    async fn find_by_username(&self, username: String) -> Result<Option<User>, DomainError>;
    /// Fails with `NotFound` for an unknown id and `ValidationError` when
    /// the new username or email belongs to someone else.
    async fn update_details(
        &self,
        id: Uuid,
        username: String,
        email: String,
    ) -> Result<User, DomainError>;
    /// Removes the user together with their reviews.
    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}
