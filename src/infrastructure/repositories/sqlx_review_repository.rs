use crate::domain::{
    review::{
        entity::{NewReview, Review, ReviewDetails, ReviewFilter},
        repository::ReviewRepository,
    },
    shared::errors::DomainError,
};
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction, types::ipnetwork::IpNetwork};
use uuid::Uuid;

const REVIEW_COLUMNS: &str = "r.id, r.post_id, r.body, r.author_id, r.is_flagged, r.flag_reason, \
     r.spam_score, host(r.ip_address) AS ip_address, r.user_agent, r.created_at";

const DETAILS_SELECT: &str = "SELECT r.id, r.post_id, p.title AS post_title, r.body, r.author_id, \
            u.username AS author_username, u.email AS author_email, \
            r.is_flagged, r.flag_reason, r.spam_score, host(r.ip_address) AS ip_address, \
            r.user_agent, r.created_at \
     FROM reviews r \
     LEFT JOIN posts p ON p.id = r.post_id \
     LEFT JOIN users u ON u.id = r.author_id";

pub struct SqlxReviewRepository {
    pub pool: PgPool,
}

impl SqlxReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn attach_to_post(
    tx: &mut Transaction<'_, Postgres>,
    post_id: Uuid,
    review_id: Uuid,
) -> Result<(), DomainError> {
    sqlx::query(
        "INSERT INTO post_reviews (post_id, review_id) VALUES ($1, $2) \
         ON CONFLICT (post_id, review_id) DO NOTHING",
    )
    .bind(post_id)
    .bind(review_id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

fn filter_clause(filter: ReviewFilter) -> &'static str {
    match filter {
        ReviewFilter::All => "",
        ReviewFilter::Flagged => " WHERE r.is_flagged",
    }
}

#[async_trait]
impl ReviewRepository for SqlxReviewRepository {
    async fn create(&self, review: NewReview, publish: bool) -> Result<Review, DomainError> {
        let id = Uuid::now_v7();
        let ip = review.ip_address.map(IpNetwork::from);
        let mut tx = self.pool.begin().await?;

        let post_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1)")
                .bind(review.post_id)
                .fetch_one(&mut *tx)
                .await?;
        if !post_exists {
            return Err(DomainError::NotFound(format!("Post {}", review.post_id)));
        }

        sqlx::query(
            "INSERT INTO reviews (id, post_id, body, author_id, is_flagged, flag_reason, \
                                  spam_score, ip_address, user_agent) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(id)
        .bind(review.post_id)
        .bind(&review.body)
        .bind(review.author_id)
        .bind(review.is_flagged)
        .bind(&review.flag_reason)
        .bind(review.spam_score)
        .bind(ip)
        .bind(&review.user_agent)
        .execute(&mut *tx)
        .await?;

        if publish {
            attach_to_post(&mut tx, review.post_id, id).await?;
        }

        let created = sqlx::query_as::<_, Review>(&format!(
            "SELECT {} FROM reviews r WHERE r.id = $1",
            REVIEW_COLUMNS
        ))
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>, DomainError> {
        let review = sqlx::query_as::<_, Review>(&format!(
            "SELECT {} FROM reviews r WHERE r.id = $1",
            REVIEW_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(review)
    }

    async fn find_details(&self, id: Uuid) -> Result<Option<ReviewDetails>, DomainError> {
        let details =
            sqlx::query_as::<_, ReviewDetails>(&format!("{} WHERE r.id = $1", DETAILS_SELECT))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(details)
    }

    async fn approve(&self, id: Uuid) -> Result<Review, DomainError> {
        let mut tx = self.pool.begin().await?;

        let review = sqlx::query_as::<_, Review>(&format!(
            "UPDATE reviews r SET is_flagged = FALSE, flag_reason = NULL \
             WHERE r.id = $1 RETURNING {}",
            REVIEW_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("Review {}", id)))?;

        attach_to_post(&mut tx, review.post_id, review.id).await?;

        tx.commit().await?;
        Ok(review)
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM post_reviews WHERE review_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("Review {}", id)));
        }

        tx.commit().await?;
        Ok(())
    }

    async fn list(
        &self,
        filter: ReviewFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ReviewDetails>, DomainError> {
        let rows = sqlx::query_as::<_, ReviewDetails>(&format!(
            "{}{} ORDER BY r.created_at DESC LIMIT $1 OFFSET $2",
            DETAILS_SELECT,
            filter_clause(filter)
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn count(&self, filter: ReviewFilter) -> Result<i64, DomainError> {
        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM reviews r{}",
            filter_clause(filter)
        ))
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    async fn list_visible_for_post(&self, post_id: Uuid) -> Result<Vec<ReviewDetails>, DomainError> {
        let rows = sqlx::query_as::<_, ReviewDetails>(&format!(
            "{} JOIN post_reviews pr ON pr.review_id = r.id \
             WHERE pr.post_id = $1 ORDER BY pr.position",
            DETAILS_SELECT
        ))
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
