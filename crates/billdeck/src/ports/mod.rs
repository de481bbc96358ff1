//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the domain layer
//! interacts with external systems (stats upstream, mailbox storage).
//!
//! Implementations of these traits live in the server's adapters.

mod mailbox;
mod stats_source;

// Re-exports
pub use mailbox::*;
pub use stats_source::*;
