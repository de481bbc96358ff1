//! BrainLog - A single event emitted by the agent's execution
//!
//! Logs are created by the agent process; the dashboard only reads and
//! classifies them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::null_as_default;
use crate::domain::value_objects::LogType;

/// Open key-value metadata with typed accessors for the fields the
/// dashboard cares about (`turns`, `costUsd`, `input`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct LogMetadata(pub Map<String, Value>);

impl LogMetadata {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Number of turns; missing or non-numeric reads as 0
    pub fn turns(&self) -> u64 {
        self.0
            .get("turns")
            .and_then(|v| v.as_f64())
            .filter(|n| n.is_finite() && *n > 0.0)
            .map(|n| n as u64)
            .unwrap_or(0)
    }

    /// Cost in USD; missing or non-numeric reads as 0
    pub fn cost_usd(&self) -> f64 {
        self.0
            .get("costUsd")
            .and_then(|v| v.as_f64())
            .filter(|n| n.is_finite())
            .unwrap_or(0.0)
    }

    /// Tool input rendered as text (strings verbatim, anything else as JSON)
    pub fn input(&self) -> Option<String> {
        match self.0.get("input")? {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BrainLog {
    pub id: i64,
    pub log_type: LogType,
    #[serde(default)]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: LogMetadata,
    /// Epoch milliseconds
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl BrainLog {
    pub fn new(id: i64, log_type: LogType, content: impl Into<String>, timestamp: i64) -> Self {
        Self {
            id,
            log_type,
            content: content.into(),
            metadata: LogMetadata::default(),
            timestamp,
            session_id: None,
        }
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_metadata(mut self, key: &str, value: Value) -> Self {
        self.metadata.0.insert(key.to_string(), value);
        self
    }

    /// Age relative to `now_ms`; negative for logs stamped in the future
    pub fn age_ms(&self, now_ms: i64) -> i64 {
        now_ms.saturating_sub(self.timestamp)
    }

    pub fn belongs_to(&self, session_id: &str) -> bool {
        self.session_id.as_deref() == Some(session_id)
    }
}

/// Sort logs into the canonical order: ascending timestamp, ties by id.
///
/// Upstream delivery order has flipped between versions and ids are not
/// globally ordered across sessions, so every derivation sorts first.
pub fn canonical_order(logs: &[BrainLog]) -> Vec<&BrainLog> {
    let mut ordered: Vec<&BrainLog> = logs.iter().collect();
    ordered.sort_by_key(|log| (log.timestamp, log.id));
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_upstream_shape() {
        let log: BrainLog = serde_json::from_value(json!({
            "id": 7,
            "logType": "cost",
            "content": "Session cost",
            "metadata": { "costUsd": 0.0123, "turns": 4 },
            "timestamp": 1_700_000_000_000i64,
            "sessionId": "agent:main:topic_42"
        }))
        .unwrap();

        assert_eq!(log.log_type, LogType::Cost);
        assert_eq!(log.metadata.turns(), 4);
        assert!((log.metadata.cost_usd() - 0.0123).abs() < f64::EPSILON);
        assert!(log.belongs_to("agent:main:topic_42"));
    }

    #[test]
    fn test_null_metadata_and_missing_session() {
        let log: BrainLog = serde_json::from_value(json!({
            "id": 1,
            "logType": "thinking",
            "content": "hmm",
            "metadata": null,
            "timestamp": 5
        }))
        .unwrap();

        assert_eq!(log.metadata, LogMetadata::default());
        assert_eq!(log.metadata.cost_usd(), 0.0);
        assert!(log.session_id.is_none());
    }

    #[test]
    fn test_input_rendering() {
        let log = BrainLog::new(1, LogType::ToolCall, "Read", 0)
            .with_metadata("input", json!({ "path": "/tmp/x" }));
        assert_eq!(log.metadata.input().unwrap(), r#"{"path":"/tmp/x"}"#);

        let log = BrainLog::new(2, LogType::ToolCall, "Bash", 0).with_metadata("input", json!("ls"));
        assert_eq!(log.metadata.input().unwrap(), "ls");
    }

    #[test]
    fn test_canonical_order_sorts_by_timestamp_then_id() {
        let logs = vec![
            BrainLog::new(3, LogType::User, "c", 300),
            BrainLog::new(9, LogType::User, "a", 100),
            BrainLog::new(2, LogType::User, "b", 300),
        ];
        let ids: Vec<i64> = canonical_order(&logs).iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![9, 2, 3]);
    }
}
