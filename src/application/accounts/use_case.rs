use super::dto::UpdateDetailsRequest;
use crate::domain::{
    shared::errors::DomainError,
    user::{entity::User, repository::UserRepository},
};
use crate::infrastructure::notifications::{NotificationSender, dispatch};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Self-service changes to a signed-in account. Every change is confirmed
/// with the current password and announced by mail.
pub struct AccountUseCase {
    users: Arc<dyn UserRepository>,
    notifier: Arc<dyn NotificationSender>,
    site_name: String,
}

fn check_password(user: &User, password: &str) -> Result<(), DomainError> {
    match bcrypt::verify(password, &user.password_hash) {
        Ok(true) => Ok(()),
        _ => Err(DomainError::InvalidCredentials),
    }
}

impl AccountUseCase {
    pub fn new(
        users: Arc<dyn UserRepository>,
        notifier: Arc<dyn NotificationSender>,
        site_name: String,
    ) -> Self {
        Self {
            users,
            notifier,
            site_name,
        }
    }

    fn notify(&self, subject: &str, body: String, recipient: String) {
        let subject = format!("[{}] {}", self.site_name, subject);
        dispatch(self.notifier.clone(), subject, body, Some(recipient));
    }

    async fn load(&self, user_id: Uuid) -> Result<User, DomainError> {
        self.users
            .find_by_id(user_id)
            .await?
            .filter(|u| !u.is_anonymous())
            .ok_or(DomainError::Unauthorized)
    }

    /// Changes username and email. Both must be free or already this
    /// user's. The new address is told, and so is the old one when it changed.
    #[instrument(skip(self, request))]
    pub async fn update_details(
        &self,
        user_id: Uuid,
        request: UpdateDetailsRequest,
    ) -> Result<User, DomainError> {
        let user = self.load(user_id).await?;
        check_password(&user, &request.password)?;

        let username = request.username.trim().to_string();
        let email = request.email.trim().to_lowercase();

        let email_owner = self.users.find_by_email(email.clone()).await?;
        if email_owner.is_some_and(|other| other.id != user.id) {
            return Err(DomainError::ValidationError(
                "Email already registered".to_string(),
            ));
        }
        let username_owner = self.users.find_by_username(username.clone()).await?;
        if username_owner.is_some_and(|other| other.id != user.id) {
            return Err(DomainError::ValidationError(
                "Username already taken".to_string(),
            ));
        }

        let updated = self
            .users
            .update_details(user.id, username, email.clone())
            .await?;
        info!(user_id = %updated.id, "Account details updated");

        let body = format!(
            "Your account details were updated.\n\nUsername: {}\nEmail: {}",
            updated.username, email
        );
        self.notify("Details Updated", body.clone(), email.clone());
        if let Some(previous) = user.email.filter(|e| !e.is_empty() && *e != email) {
            self.notify("Details Updated", body, previous);
        }

        Ok(updated)
    }

    /// Deletes the account and every review it wrote.
    #[instrument(skip(self, password))]
    pub async fn delete_account(&self, user_id: Uuid, password: &str) -> Result<(), DomainError> {
        let user = self.load(user_id).await?;
        check_password(&user, password)?;

        self.users.delete(user.id).await?;
        info!(user_id = %user.id, "Account deleted");

        if let Some(email) = user.email.filter(|e| !e.is_empty()) {
            let body = format!(
                "The account \"{}\" and all of its reviews have been deleted.",
                user.username
            );
            self.notify("Account deleted", body, email);
        }
        Ok(())
    }
}
