//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

pub mod fs_mailbox;
pub mod http_stats;

// Re-exports
pub use fs_mailbox::FsMailbox;
pub use http_stats::HttpStatsSource;
