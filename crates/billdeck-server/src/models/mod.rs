//! Billdeck API Data Models
//!
//! - Auth: password login and session tokens
//! - Stats: polled snapshot and fetch bookkeeping
//! - Dashboard: derived widgets
//! - Git: changelog and contribution grid
//! - Mailbox: inbox uploads and outbox files

mod auth;
mod dashboard;
mod git;
mod mailbox;
mod stats;

pub use auth::*;
pub use dashboard::*;
pub use git::*;
pub use mailbox::*;
pub use stats::*;
