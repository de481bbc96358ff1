//! Domain Services
//!
//! Pure derivations over one snapshot. No I/O, no clock reads: callers
//! pass `now` so every result is reproducible.

pub mod activity;
pub mod changelog;
pub mod contributions;
pub mod sessions;

pub use activity::{ActivityBar, ActivityDeck, BarKind};
pub use changelog::{changelog, ChangelogEntry};
pub use contributions::{ContributionCell, ContributionGrid, ContributionSummary, MonthLabel};
pub use sessions::{classify_sessions, unattributed_logs, SessionView};
