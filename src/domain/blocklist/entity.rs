use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, sqlx::FromRow)]
#[ts(export)]
pub struct BlockedIp {
    pub ip: String,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}
