use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, sqlx::FromRow)]
#[ts(export)]
pub struct Review {
    pub id: Uuid,
    pub post_id: Uuid,
    pub body: String,
    pub author_id: Uuid,
    pub is_flagged: bool,
    pub flag_reason: Option<String>,
    pub spam_score: i32,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A review joined with its author and post, as shown in admin listings
/// and under a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, sqlx::FromRow)]
#[ts(export)]
pub struct ReviewDetails {
    pub id: Uuid,
    pub post_id: Uuid,
    pub post_title: Option<String>,
    pub body: String,
    pub author_id: Uuid,
    pub author_username: Option<String>,
    pub author_email: Option<String>,
    pub is_flagged: bool,
    pub flag_reason: Option<String>,
    pub spam_score: i32,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub post_id: Uuid,
    pub body: String,
    pub author_id: Uuid,
    pub is_flagged: bool,
    pub flag_reason: Option<String>,
    pub spam_score: i32,
    pub ip_address: Option<IpAddr>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewFilter {
    All,
    Flagged,
}
