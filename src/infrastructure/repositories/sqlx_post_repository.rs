use crate::domain::{
    post::{
        entity::{NewPost, Post, PostSort, PostUpdate},
        repository::PostRepository,
    },
    shared::errors::DomainError,
};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

const POST_COLUMNS: &str = "p.id, p.title, p.img, p.body, p.num, \
     ARRAY(SELECT pr.review_id FROM post_reviews pr WHERE pr.post_id = p.id ORDER BY pr.position) \
        AS review_ids, \
     p.created_at, p.updated_at";

pub struct SqlxPostRepository {
    pub pool: PgPool,
}

impl SqlxPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Post>, DomainError> {
        let post =
            sqlx::query_as::<_, Post>(&format!("SELECT {} FROM posts p WHERE p.id = $1", POST_COLUMNS))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(post)
    }
}

#[async_trait]
impl PostRepository for SqlxPostRepository {
    async fn create(&self, post: NewPost) -> Result<Post, DomainError> {
        let id = Uuid::now_v7();
        sqlx::query(
            "INSERT INTO posts (id, title, img, body, num) \
             VALUES ($1, $2, $3, $4, COALESCE($5, (SELECT COALESCE(MAX(num), 0) + 1 FROM posts)))",
        )
        .bind(id)
        .bind(&post.title)
        .bind(&post.img)
        .bind(&post.body)
        .bind(post.num)
        .execute(&self.pool)
        .await?;

        self.fetch(id)
            .await?
            .ok_or_else(|| DomainError::PersistenceFailure("Inserted post not readable".into()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, DomainError> {
        self.fetch(id).await
    }

    async fn find_all(&self, sort: PostSort) -> Result<Vec<Post>, DomainError> {
        let order = match sort {
            PostSort::Oldest => "ASC",
            PostSort::Newest => "DESC",
        };
        let posts = sqlx::query_as::<_, Post>(&format!(
            "SELECT {} FROM posts p ORDER BY p.num {}, p.created_at {}",
            POST_COLUMNS, order, order
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(posts)
    }

    async fn recent(&self, limit: i64) -> Result<Vec<Post>, DomainError> {
        let posts = sqlx::query_as::<_, Post>(&format!(
            "SELECT {} FROM posts p ORDER BY p.created_at DESC LIMIT $1",
            POST_COLUMNS
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(posts)
    }

    async fn update(&self, id: Uuid, update: PostUpdate) -> Result<Post, DomainError> {
        let result = sqlx::query(
            "UPDATE posts SET title = $2, img = $3, body = $4, num = $5, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&update.title)
        .bind(&update.img)
        .bind(&update.body)
        .bind(update.num)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("Post {}", id)));
        }

        self.fetch(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Post {}", id)))
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        // reviews and post_reviews rows go with the post via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("Post {}", id)));
        }
        Ok(())
    }

    async fn count(&self) -> Result<i64, DomainError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }
}
