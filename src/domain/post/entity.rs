use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;
use validator::Validate;

/// A blog post. `review_ids` holds approved reviews only, in the order
/// they became visible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, sqlx::FromRow)]
#[ts(export)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub img: Option<String>,
    pub body: String,
    pub num: i32,
    pub review_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, TS)]
#[ts(export)]
pub struct NewPost {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(url)]
    pub img: Option<String>,
    #[validate(length(min = 1))]
    pub body: String,
    /// Defaults to one past the highest existing number.
    #[validate(range(min = 0))]
    pub num: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, TS)]
#[ts(export)]
pub struct PostUpdate {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(url)]
    pub img: Option<String>,
    #[validate(length(min = 1))]
    pub body: String,
    #[validate(range(min = 0))]
    pub num: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostSort {
    #[default]
    Oldest,
    Newest,
}
