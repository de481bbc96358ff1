//! Value Objects
//!
//! Immutable tagged types. Every tag has an exhaustive descriptor lookup,
//! so an unrecognized tag is an explicit `Other` case, never a missing entry.

mod commit_type;
mod connection_status;
mod descriptor;
mod job;
mod log_type;
mod metric_level;
mod session_status;

pub use commit_type::*;
pub use connection_status::*;
pub use descriptor::*;
pub use job::*;
pub use log_type::*;
pub use metric_level::*;
pub use session_status::*;
