//! SessionStatus - Live session state as reported by the agent

use serde::{Deserialize, Serialize};

use super::descriptor::{Descriptor, Tone};

/// Live session state machine: idle -> thinking -> responding -> idle (or error).
///
/// The dashboard only observes transitions, it never drives them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(from = "String", into = "String")]
pub enum SessionStatus {
    #[default]
    Idle,
    Thinking,
    Responding,
    Error,
    Other(String),
}

impl SessionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            SessionStatus::Idle => "idle",
            SessionStatus::Thinking => "thinking",
            SessionStatus::Responding => "responding",
            SessionStatus::Error => "error",
            SessionStatus::Other(tag) => tag,
        }
    }

    /// Thinking or responding
    pub fn is_active(&self) -> bool {
        matches!(self, SessionStatus::Thinking | SessionStatus::Responding)
    }

    /// Status line used when neither the session nor its logs say anything
    pub fn default_message(&self) -> &'static str {
        match self {
            SessionStatus::Thinking => "Thinking...",
            SessionStatus::Responding => "Responding...",
            SessionStatus::Error => "Errored",
            SessionStatus::Idle | SessionStatus::Other(_) => "Idle",
        }
    }

    pub fn descriptor(&self) -> Descriptor {
        match self {
            SessionStatus::Idle => Descriptor::new("○", "Idle", Tone::Muted),
            SessionStatus::Thinking => Descriptor::new("◉", "Thinking", Tone::Purple),
            SessionStatus::Responding => Descriptor::new("◉", "Responding", Tone::Blue),
            SessionStatus::Error => Descriptor::new("!", "Error", Tone::Red),
            SessionStatus::Other(tag) => Descriptor::new("?", tag.clone(), Tone::Muted),
        }
    }
}

impl From<String> for SessionStatus {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "idle" => SessionStatus::Idle,
            "thinking" => SessionStatus::Thinking,
            "responding" => SessionStatus::Responding,
            "error" => SessionStatus::Error,
            _ => SessionStatus::Other(tag),
        }
    }
}

impl From<SessionStatus> for String {
    fn from(status: SessionStatus) -> Self {
        match status {
            SessionStatus::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}
