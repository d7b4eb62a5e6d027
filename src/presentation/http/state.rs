use crate::{
    application::{
        accounts::use_case::AccountUseCase, admin::use_case::AdminOverviewUseCase, posts::use_case::PostsUseCase,
        reviews::use_case::ReviewModerationUseCase,
    },
    config::Config,
    domain::{
        blocklist::repository::BlockListStore, post::repository::PostRepository,
        review::repository::ReviewRepository, tracker::repository::TrackerRepository,
        user::repository::UserRepository,
    },
    infrastructure::{
        notifications::NotificationSender,
        security::{content_filter::ContentFilter, rate_limiter::RateLimiter},
    },
};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub redis: redis::Client,
    pub config: Config,
    pub rate_limiter: Arc<RateLimiter>,
    pub users: Arc<dyn UserRepository>,
    pub block_list: Arc<dyn BlockListStore>,
    pub tracker: Arc<dyn TrackerRepository>,
    pub reviews: Arc<ReviewModerationUseCase>,
    pub posts: Arc<PostsUseCase>,
    pub admin: Arc<AdminOverviewUseCase>,
    pub accounts: Arc<AccountUseCase>,
}

/// Storage backends the state is assembled from.
pub struct Repositories {
    pub posts: Arc<dyn PostRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub users: Arc<dyn UserRepository>,
    pub block_list: Arc<dyn BlockListStore>,
    pub tracker: Arc<dyn TrackerRepository>,
}

impl AppState {
    pub fn new(
        db: PgPool,
        redis: redis::Client,
        config: Config,
        repos: Repositories,
        notifier: Arc<dyn NotificationSender>,
    ) -> anyhow::Result<Self> {
        let filter = ContentFilter::new(config.moderation_thresholds()?);

        let reviews = ReviewModerationUseCase::new(
            repos.reviews.clone(),
            repos.posts.clone(),
            repos.block_list.clone(),
            notifier.clone(),
            filter,
            config.site_name.clone(),
        );
        let accounts =
            AccountUseCase::new(repos.users.clone(), notifier, config.site_name.clone());
        let posts = PostsUseCase::new(repos.posts.clone(), repos.reviews.clone());
        let admin = AdminOverviewUseCase::new(
            repos.posts,
            repos.reviews,
            repos.block_list.clone(),
            repos.tracker.clone(),
        );

        Ok(Self {
            db,
            rate_limiter: Arc::new(RateLimiter::new(redis.clone())),
            redis,
            config,
            users: repos.users,
            block_list: repos.block_list,
            tracker: repos.tracker,
            reviews: Arc::new(reviews),
            posts: Arc::new(posts),
            admin: Arc::new(admin),
            accounts: Arc::new(accounts),
        })
    }
}
