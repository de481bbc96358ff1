//! Stats Poller (Use Case)
//!
//! Keeps the shared [`SnapshotStore`] fresh: fetch once immediately, then on
//! every interval tick. Every fetch goes through the store's ticket
//! protocol, so a slow response can never replace a newer one.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use billdeck::{Applied, SnapshotStore, StatsSnapshot, StatsSource};

/// What readers see: one pinned snapshot plus fetch bookkeeping
#[derive(Debug, Clone)]
pub struct PolledStats {
    pub snapshot: Arc<StatsSnapshot>,
    /// False while the offline fallback is being served
    pub live: bool,
    pub last_fetch: Option<DateTime<Utc>>,
    pub fetch_error: Option<String>,
}

pub struct StatsPoller<S: StatsSource> {
    source: Arc<S>,
    store: Arc<RwLock<SnapshotStore>>,
    in_flight: AtomicBool,
    interval: Duration,
    fallback: Arc<StatsSnapshot>,
}

impl<S: StatsSource + 'static> StatsPoller<S> {
    pub fn new(source: Arc<S>, interval: Duration, birthday: &str) -> Self {
        Self {
            source,
            store: Arc::new(RwLock::new(SnapshotStore::new())),
            in_flight: AtomicBool::new(false),
            interval,
            fallback: Arc::new(StatsSnapshot::offline_fallback(birthday)),
        }
    }

    /// Spawn the polling loop. The first tick fires immediately.
    pub fn start(self: Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;

                // Fetch off the timer task so a slow upstream cannot delay ticks
                let poller = Arc::clone(&self);
                tokio::spawn(async move {
                    poller.tick().await;
                });
            }
        })
    }

    /// One scheduled poll. Returns `None` when the previous one is still
    /// pending.
    pub async fn tick(&self) -> Option<Applied> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("Previous stats fetch still in flight, skipping tick");
            return None;
        }

        let applied = self.fetch().await;
        self.in_flight.store(false, Ordering::Release);
        Some(applied)
    }

    /// Manual refresh. Not gated by the scheduled poll; ordering is still
    /// enforced by the ticket sequence.
    pub async fn refresh_now(&self) -> Applied {
        self.fetch().await
    }

    async fn fetch(&self) -> Applied {
        let ticket = self.store.write().await.begin();

        let result = self.source.fetch().await.map_err(|e| e.to_string());
        if let Err(e) = &result {
            tracing::warn!("⚠️  Stats fetch #{} failed: {}", ticket.seq(), e);
        }

        let applied = self.store.write().await.complete(ticket, result, Utc::now());
        if applied == Applied::Snapshot {
            tracing::debug!("Snapshot #{} applied", ticket.seq());
        }
        applied
    }

    /// Current snapshot, or the offline fallback before the first success
    pub async fn current(&self) -> PolledStats {
        let store = self.store.read().await;
        let (snapshot, live) = match store.snapshot() {
            Some(snapshot) => (snapshot, true),
            None => (Arc::clone(&self.fallback), false),
        };

        PolledStats {
            snapshot,
            live,
            last_fetch: store.last_fetch(),
            fetch_error: store.fetch_error().map(str::to_string),
        }
    }
}
