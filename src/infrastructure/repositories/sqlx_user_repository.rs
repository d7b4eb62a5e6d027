use crate::domain::{
    shared::errors::DomainError,
    user::{
        entity::{NewUser, ROLE_USER, User},
        repository::UserRepository,
    },
};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

pub struct SqlxUserRepository {
    pub pool: PgPool,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, username, email, password_hash, role) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, username, email, password_hash, role, created_at",
        )
        .bind(Uuid::now_v7())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(ROLE_USER)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                DomainError::ValidationError("Username or email already registered".into())
            }
            other => other.into(),
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, role, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_username(&self, username: String) -> Result<Option<User>, DomainError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, role, created_at \
             FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn update_details(
        &self,
        id: Uuid,
        username: String,
        email: String,
    ) -> Result<User, DomainError> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET username = $2, email = $3 WHERE id = $1 \
             RETURNING id, username, email, password_hash, role, created_at",
        )
        .bind(id)
        .bind(&username)
        .bind(&email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                DomainError::ValidationError("Username or email already registered".into())
            }
            other => other.into(),
        })?
        .ok_or_else(|| DomainError::NotFound(format!("User {}", id)))
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        // reviews and their post_reviews entries cascade
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("User {}", id)));
        }
        Ok(())
    }

    async fn find_by_email(&self, email: String) -> Result<Option<User>, DomainError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, role, created_at \
             FROM users WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}
