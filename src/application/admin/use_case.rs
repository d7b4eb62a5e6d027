use super::dto::{DashboardSummary, RECENT_POSTS, TOP_ROUTES, TrackerAnalytics};
use crate::domain::{
    blocklist::repository::BlockListStore,
    post::repository::PostRepository,
    review::{entity::ReviewFilter, repository::ReviewRepository},
    shared::{
        errors::DomainError,
        pagination::{PaginatedResponse, PaginationRequest},
    },
    tracker::repository::TrackerRepository,
};
use std::sync::Arc;

/// Read-only views for the admin dashboard.
pub struct AdminOverviewUseCase {
    posts: Arc<dyn PostRepository>,
    reviews: Arc<dyn ReviewRepository>,
    block_list: Arc<dyn BlockListStore>,
    tracker: Arc<dyn TrackerRepository>,
}

impl AdminOverviewUseCase {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        reviews: Arc<dyn ReviewRepository>,
        block_list: Arc<dyn BlockListStore>,
        tracker: Arc<dyn TrackerRepository>,
    ) -> Self {
        Self {
            posts,
            reviews,
            block_list,
            tracker,
        }
    }

    pub async fn dashboard(&self) -> Result<DashboardSummary, DomainError> {
        let (post_count, recent_posts, flagged_review_count, total_review_count, blocked_ip_count) = tokio::try_join!(
            self.posts.count(),
            self.posts.recent(RECENT_POSTS),
            self.reviews.count(ReviewFilter::Flagged),
            self.reviews.count(ReviewFilter::All),
            self.block_list.count(),
        )?;

        Ok(DashboardSummary {
            post_count,
            recent_posts,
            flagged_review_count,
            total_review_count,
            blocked_ip_count,
        })
    }

    pub async fn tracker_analytics(
        &self,
        pagination: PaginationRequest,
    ) -> Result<TrackerAnalytics, DomainError> {
        let pagination = pagination.normalized();
        let (totals, blocked_ip_count, countries, top_routes, items, total) = tokio::try_join!(
            self.tracker.totals(),
            self.block_list.count(),
            self.tracker.country_stats(),
            self.tracker.top_routes(TOP_ROUTES),
            self.tracker.list(pagination.limit, pagination.offset()),
            self.tracker.count(),
        )?;

        Ok(TrackerAnalytics {
            totals,
            blocked_ip_count,
            countries,
            top_routes,
            entries: PaginatedResponse::new(items, total, pagination),
        })
    }
}
