//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations and coordinates between
//! ports and their adapters.

mod mailbox_service;
mod poller;

pub use mailbox_service::{Download, MailboxService};
pub use poller::{PolledStats, StatsPoller};
