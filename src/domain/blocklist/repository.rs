use super::entity::BlockedIp;
use crate::domain::shared::errors::DomainError;
use async_trait::async_trait;
use std::net::IpAddr;

/// Set of blocked client addresses.
///
/// `add` is a single atomic set-insert: concurrent adds of the same address
/// never produce duplicates and never lose an insert.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlockListStore: Send + Sync {
    /// Returns `true` when the address was not blocked before.
    async fn add(&self, ip: IpAddr, reason: Option<String>) -> Result<bool, DomainError>;
    /// Returns `true` when the address was blocked before. Absent addresses are not an error.
    async fn remove(&self, ip: IpAddr) -> Result<bool, DomainError>;
    async fn contains(&self, ip: IpAddr) -> Result<bool, DomainError>;
    async fn list(&self) -> Result<Vec<BlockedIp>, DomainError>;
    async fn count(&self) -> Result<i64, DomainError>;
}
