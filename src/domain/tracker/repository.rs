use super::entity::{CountryStat, RouteStat, TrackerEntry, TrackerTotals, Visit};
use crate::domain::shared::errors::DomainError;
use async_trait::async_trait;

#[async_trait]
pub trait TrackerRepository: Send + Sync {
    /// Upserts the per-IP entry and increments its counters.
    async fn record(&self, visit: Visit) -> Result<(), DomainError>;
    async fn totals(&self) -> Result<TrackerTotals, DomainError>;
    async fn country_stats(&self) -> Result<Vec<CountryStat>, DomainError>;
    async fn top_routes(&self, limit: i64) -> Result<Vec<RouteStat>, DomainError>;
    /// Most recently seen first.
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<TrackerEntry>, DomainError>;
    async fn count(&self) -> Result<i64, DomainError>;
}
