use super::dto::PostWithReviews;
use crate::domain::{
    post::{
        entity::{NewPost, Post, PostSort, PostUpdate},
        repository::PostRepository,
    },
    review::repository::ReviewRepository,
    shared::errors::DomainError,
};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

pub struct PostsUseCase {
    posts: Arc<dyn PostRepository>,
    reviews: Arc<dyn ReviewRepository>,
}

impl PostsUseCase {
    pub fn new(posts: Arc<dyn PostRepository>, reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { posts, reviews }
    }

    pub async fn list(&self, sort: PostSort) -> Result<Vec<Post>, DomainError> {
        self.posts.find_all(sort).await
    }

    pub async fn show(&self, id: Uuid) -> Result<PostWithReviews, DomainError> {
        let post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Post {}", id)))?;
        let reviews = self.reviews.list_visible_for_post(id).await?;
        Ok(PostWithReviews { post, reviews })
    }

    #[instrument(skip(self, post), fields(title = %post.title))]
    pub async fn create(&self, post: NewPost) -> Result<Post, DomainError> {
        post.validate()?;
        let created = self.posts.create(post).await?;
        info!(post_id = %created.id, num = created.num, "Post created");
        Ok(created)
    }

    #[instrument(skip(self, update))]
    pub async fn update(&self, id: Uuid, update: PostUpdate) -> Result<Post, DomainError> {
        update.validate()?;
        self.posts.update(id, update).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.posts.delete(id).await?;
        info!(post_id = %id, "Post deleted with its reviews");
        Ok(())
    }
}
