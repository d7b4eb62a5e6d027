use crate::domain::{
    blocklist::entity::BlockedIp,
    post::entity::Post,
    shared::pagination::PaginatedResponse,
    tracker::entity::{CountryStat, RouteStat, TrackerEntry, TrackerTotals},
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const RECENT_POSTS: i64 = 5;
pub const TOP_ROUTES: i64 = 10;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct DashboardSummary {
    pub post_count: i64,
    pub recent_posts: Vec<Post>,
    pub flagged_review_count: i64,
    pub total_review_count: i64,
    pub blocked_ip_count: i64,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct TrackerAnalytics {
    pub totals: TrackerTotals,
    pub blocked_ip_count: i64,
    pub countries: Vec<CountryStat>,
    pub top_routes: Vec<RouteStat>,
    pub entries: PaginatedResponse<TrackerEntry>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct BlockIpRequest {
    pub ip: String,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct BlockIpResponse {
    pub ip: String,
    pub newly_blocked: bool,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct BlockedIpList {
    pub items: Vec<BlockedIp>,
    pub total: usize,
}
