//! Billdeck Domain Library
//!
//! Core domain types and derivations for the Bill agent dashboard.
//!
//! # Architecture
//!
//! Same layering as the server it backs:
//!
//! - **Domain Layer** (`domain/`): Pure entities and derivations
//!   - `entities/`: Snapshot payloads (StatsSnapshot, BrainLog, JobLog, LiveSession, Git)
//!   - `value_objects/`: Tagged enums with display descriptors (LogType, JobType, ...)
//!   - `services/`: Session classifier, activity aggregator, changelog, contributions
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `StatsSource`: where snapshots come from
//!   - `MailboxStore`: inbox/outbox storage
//!
//! - **Sync** (`sync`): sequence-numbered snapshot store (stale responses are dropped)
//! - **Render** (`render`): view models for the dashboard widgets
//! - **Format** (`format`): byte sizes, relative times, durations
//!
//! # Usage
//!
//! ```rust,ignore
//! use billdeck::{classify_sessions, ActivityDeck, StatsSnapshot};
//!
//! let snapshot: StatsSnapshot = serde_json::from_str(body)?;
//! let deck = ActivityDeck::compute(snapshot.brain_logs(), snapshot.live_sessions(), now_ms);
//! ```

pub mod domain;
pub mod format;
pub mod ports;
pub mod render;
pub mod sync;

// Re-export commonly used types
pub use domain::{
    canonical_order, classify_sessions, unattributed_logs, ActivityBar, ActivityDeck, BrainLog,
    ChangelogEntry, CommitType, ConnectionStatus, ContributionGrid, ContributionSummary,
    Descriptor, DomainError, GitCommit, GitContribution, GitInfo, JobLog, JobStatus, JobType,
    JobsSummary, LiveSession, LogMetadata, LogType, MetricLevel, Milestone, MilestoneStatus,
    ScheduledJob, SessionStatus, SessionView, StatsSnapshot, SystemMetrics, TopSender,
};
pub use ports::{MailboxStore, OutboxFile, StatsSource, StoredFile, MAX_UPLOAD_BYTES};
pub use sync::{Applied, FetchTicket, SnapshotStore};
