use crate::domain::{
    post::entity::{Post, PostSort},
    review::entity::ReviewDetails,
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PostListQuery {
    #[serde(default)]
    pub sort: PostSort,
}

/// A post with its visible reviews, in list order.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct PostWithReviews {
    pub post: Post,
    pub reviews: Vec<ReviewDetails>,
}
