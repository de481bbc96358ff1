//! Snapshot Store - single-writer state for polled snapshots
//!
//! Every fetch takes a ticket with a monotonically increasing sequence
//! number before it starts. A completion is applied only if its sequence is
//! newer than the last one applied, so a slow request that started earlier
//! can never overwrite the result of a faster, later one.
//!
//! Failures keep the previous snapshot: stale data beats no data.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::StatsSnapshot;

/// Handed out by [`SnapshotStore::begin`], returned with the result
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.0
    }
}

/// What happened to a completed fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// New snapshot installed, error cleared
    Snapshot,
    /// Error recorded, previous snapshot kept
    Error,
    /// A newer fetch already completed; result dropped
    Stale,
}

#[derive(Debug, Default)]
pub struct SnapshotStore {
    snapshot: Option<Arc<StatsSnapshot>>,
    last_fetch: Option<DateTime<Utc>>,
    fetch_error: Option<String>,
    next_seq: u64,
    applied_seq: Option<u64>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a sequence number for a fetch about to start
    pub fn begin(&mut self) -> FetchTicket {
        let ticket = FetchTicket(self.next_seq);
        self.next_seq += 1;
        ticket
    }

    /// Apply a finished fetch, unless a newer one already landed
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<StatsSnapshot, String>,
        at: DateTime<Utc>,
    ) -> Applied {
        if self.applied_seq.is_some_and(|applied| ticket.0 <= applied) {
            tracing::debug!(seq = ticket.0, "Dropping stale snapshot response");
            return Applied::Stale;
        }
        self.applied_seq = Some(ticket.0);

        match result {
            Ok(snapshot) => {
                self.snapshot = Some(Arc::new(snapshot));
                self.last_fetch = Some(at);
                self.fetch_error = None;
                Applied::Snapshot
            }
            Err(message) => {
                self.fetch_error = Some(message);
                Applied::Error
            }
        }
    }

    /// Latest applied snapshot. Cloning the `Arc` pins one snapshot for a
    /// whole render pass.
    pub fn snapshot(&self) -> Option<Arc<StatsSnapshot>> {
        self.snapshot.clone()
    }

    pub fn last_fetch(&self) -> Option<DateTime<Utc>> {
        self.last_fetch
    }

    pub fn fetch_error(&self) -> Option<&str> {
        self.fetch_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConnectionStatus;
    use chrono::Duration;

    fn snapshot(uptime: &str) -> StatsSnapshot {
        StatsSnapshot {
            status: ConnectionStatus::Online,
            uptime: uptime.to_string(),
            ..StatsSnapshot::default()
        }
    }

    #[test]
    fn test_success_replaces_and_clears_error() {
        let mut store = SnapshotStore::new();
        let now = Utc::now();

        let t1 = store.begin();
        assert_eq!(store.complete(t1, Err("boom".into()), now), Applied::Error);
        assert_eq!(store.fetch_error(), Some("boom"));
        assert!(store.snapshot().is_none());

        let t2 = store.begin();
        assert_eq!(store.complete(t2, Ok(snapshot("1h")), now), Applied::Snapshot);
        assert!(store.fetch_error().is_none());
        assert_eq!(store.snapshot().unwrap().uptime, "1h");
        assert_eq!(store.last_fetch(), Some(now));
    }

    #[test]
    fn test_failure_keeps_previous_snapshot() {
        let mut store = SnapshotStore::new();
        let first = Utc::now();

        let t1 = store.begin();
        store.complete(t1, Ok(snapshot("1h")), first);

        let t2 = store.begin();
        let later = first + Duration::seconds(5);
        assert_eq!(
            store.complete(t2, Err("Could not connect to Bill".into()), later),
            Applied::Error
        );

        assert_eq!(store.snapshot().unwrap().uptime, "1h");
        assert_eq!(store.last_fetch(), Some(first));
        assert_eq!(store.fetch_error(), Some("Could not connect to Bill"));
    }

    #[test]
    fn test_out_of_order_completion_keeps_newest() {
        let mut store = SnapshotStore::new();
        let now = Utc::now();

        let a = store.begin();
        let b = store.begin();

        assert_eq!(store.complete(b, Ok(snapshot("B")), now), Applied::Snapshot);
        assert_eq!(store.complete(a, Ok(snapshot("A")), now), Applied::Stale);
        assert_eq!(store.snapshot().unwrap().uptime, "B");

        // A stale error must not raise the banner either
        let c = store.begin();
        let d = store.begin();
        store.complete(d, Ok(snapshot("D")), now);
        assert_eq!(store.complete(c, Err("late failure".into()), now), Applied::Stale);
        assert!(store.fetch_error().is_none());
    }

    #[test]
    fn test_pinned_snapshot_survives_replacement() {
        let mut store = SnapshotStore::new();
        let now = Utc::now();
        let t1 = store.begin();
        store.complete(t1, Ok(snapshot("old")), now);

        let pinned = store.snapshot().unwrap();
        let t2 = store.begin();
        store.complete(t2, Ok(snapshot("new")), now);

        assert_eq!(pinned.uptime, "old");
        assert_eq!(store.snapshot().unwrap().uptime, "new");
    }
}
