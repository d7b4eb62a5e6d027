use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use ts_rs::TS;

/// One handled request, as recorded by the tracking middleware.
#[derive(Debug, Clone, PartialEq)]
pub struct Visit {
    pub ip: IpAddr,
    pub country: String,
    pub city: String,
    pub route: String,
    pub user_agent: String,
    /// Response status below 400.
    pub good: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, sqlx::FromRow)]
#[ts(export)]
pub struct TrackerEntry {
    pub ip: String,
    pub country: String,
    pub city: String,
    pub times_visited: i64,
    /// Route path → request count.
    #[ts(type = "Record<string, number>")]
    pub routes: serde_json::Value,
    pub user_agent: String,
    pub is_first_visit: bool,
    pub good_requests: i64,
    pub bad_requests: i64,
    pub first_visit_at: DateTime<Utc>,
    pub last_visit_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS, sqlx::FromRow)]
#[ts(export)]
pub struct TrackerTotals {
    pub total_good_requests: i64,
    pub total_bad_requests: i64,
    pub total_requests: i64,
    pub unique_ips: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, sqlx::FromRow)]
#[ts(export)]
pub struct CountryStat {
    pub country: String,
    pub visits: i64,
    pub unique_ips: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, sqlx::FromRow)]
#[ts(export)]
pub struct RouteStat {
    pub route: String,
    pub total: i64,
}
