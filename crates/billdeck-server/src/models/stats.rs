//! Stats DTOs - Polled snapshot with fetch bookkeeping

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use billdeck::StatsSnapshot;

use crate::application::PolledStats;

/// Latest snapshot as the poller sees it
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    /// Upstream payload, or the offline fallback before the first success
    #[schema(value_type = Object)]
    pub snapshot: StatsSnapshot,
    pub live: bool,
    pub last_fetch: Option<DateTime<Utc>>,
    pub fetch_error: Option<String>,
}

impl From<PolledStats> for StatsResponse {
    fn from(polled: PolledStats) -> Self {
        Self {
            snapshot: (*polled.snapshot).clone(),
            live: polled.live,
            last_fetch: polled.last_fetch,
            fetch_error: polled.fetch_error,
        }
    }
}

/// Result of a manual refresh
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    /// `snapshot`, `error` or `stale`
    pub outcome: String,
    pub stats: StatsResponse,
}
