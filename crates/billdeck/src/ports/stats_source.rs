//! Stats Source Port
//!
//! Where snapshots come from: the agent's stats API in production, canned
//! values in tests.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, StatsSnapshot};

#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Fetch one complete snapshot
    async fn fetch(&self) -> Result<StatsSnapshot, DomainError>;
}
