//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - StatsSnapshot: one poll response from the agent
//! - BrainLog: execution event (tool call, thought, cost...)
//! - JobLog: scheduled job run
//! - LiveSession: work in progress for one topic
//! - Git: commit history and contribution counts

mod brain_log;
mod git;
mod job_log;
mod live_session;
mod stats;

pub use brain_log::*;
pub use git::*;
pub use job_log::*;
pub use live_session::*;
pub use stats::*;

use serde::{Deserialize, Deserializer};

/// Treat an explicit JSON `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
