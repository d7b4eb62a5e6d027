use crate::domain::{
    blocklist::{entity::BlockedIp, repository::BlockListStore},
    shared::errors::DomainError,
};
use async_trait::async_trait;
use sqlx::{PgPool, types::ipnetwork::IpNetwork};
use std::net::IpAddr;

pub struct SqlxBlockListStore {
    pub pool: PgPool,
}

impl SqlxBlockListStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlockListStore for SqlxBlockListStore {
    async fn add(&self, ip: IpAddr, reason: Option<String>) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "INSERT INTO blocked_ips (ip, reason) VALUES ($1, $2) ON CONFLICT (ip) DO NOTHING",
        )
        .bind(IpNetwork::from(ip))
        .bind(reason)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn remove(&self, ip: IpAddr) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM blocked_ips WHERE ip = $1")
            .bind(IpNetwork::from(ip))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn contains(&self, ip: IpAddr) -> Result<bool, DomainError> {
        let blocked =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM blocked_ips WHERE ip = $1)")
                .bind(IpNetwork::from(ip))
                .fetch_one(&self.pool)
                .await?;
        Ok(blocked)
    }

    async fn list(&self) -> Result<Vec<BlockedIp>, DomainError> {
        let rows = sqlx::query_as::<_, BlockedIp>(
            "SELECT host(ip) AS ip, reason, created_at FROM blocked_ips ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn count(&self) -> Result<i64, DomainError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM blocked_ips")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }
}
