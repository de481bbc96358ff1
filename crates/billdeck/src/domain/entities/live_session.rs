//! LiveSession - A server-tracked unit of agent work in progress
//!
//! Correlated to a conversation/topic. The agent drives the status; the
//! dashboard only computes staleness locally from the heartbeat.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::value_objects::SessionStatus;

/// A heartbeat older than this flags the session as possibly frozen.
pub const STALE_AFTER_MS: i64 = 60_000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LiveSession {
    pub session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_name: Option<String>,
    #[serde(default)]
    pub status: SessionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_request: Option<String>,
    /// Epoch milliseconds, present while active
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<i64>,
    /// Epoch milliseconds
    #[serde(default)]
    pub last_heartbeat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_status: Option<String>,
    #[serde(default)]
    pub metadata: Value,
}

impl LiveSession {
    pub fn new(session_id: impl Into<String>, status: SessionStatus, last_heartbeat: i64) -> Self {
        Self {
            session_id: session_id.into(),
            topic_name: None,
            status,
            current_request: None,
            started_at: None,
            last_heartbeat,
            current_status: None,
            metadata: Value::Null,
        }
    }

    pub fn is_stale(&self, now_ms: i64) -> bool {
        now_ms.saturating_sub(self.last_heartbeat) > STALE_AFTER_MS
    }

    /// How long the current turn has been running
    pub fn active_for_ms(&self, now_ms: i64) -> Option<i64> {
        self.started_at.map(|started| now_ms.saturating_sub(started).max(0))
    }

    /// Human name: topic name, else `#<id>` from a `topic_<id>` tail, else
    /// the last `:` segment, else the raw session id.
    pub fn display_name(&self) -> String {
        if let Some(topic) = self.topic_name.as_deref().filter(|t| !t.trim().is_empty()) {
            return topic.to_string();
        }

        let tail = self.session_id.rsplit(':').next().unwrap_or_default();
        if tail.is_empty() {
            return self.session_id.clone();
        }

        match tail.strip_prefix("topic_") {
            Some(rest) => format!("#{}", rest),
            None => tail.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_prefers_topic() {
        let mut session = LiveSession::new("agent:main:topic_12", SessionStatus::Idle, 0);
        session.topic_name = Some("Landing page".to_string());
        assert_eq!(session.display_name(), "Landing page");
    }

    #[test]
    fn test_display_name_from_topic_segment() {
        let session = LiveSession::new("agent:main:topic_12", SessionStatus::Idle, 0);
        assert_eq!(session.display_name(), "#12");

        let session = LiveSession::new("agent:main:dm", SessionStatus::Idle, 0);
        assert_eq!(session.display_name(), "dm");
    }

    #[test]
    fn test_display_name_falls_back_to_raw_id() {
        let session = LiveSession::new("agent:main:", SessionStatus::Idle, 0);
        assert_eq!(session.display_name(), "agent:main:");
    }

    #[test]
    fn test_staleness_threshold() {
        let session = LiveSession::new("s", SessionStatus::Thinking, 1_000);
        assert!(!session.is_stale(61_000));
        assert!(session.is_stale(61_001));
    }
}
