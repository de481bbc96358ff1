//! Session Classifier
//!
//! Partitions one snapshot's brain logs by live session and derives what
//! each session card shows. Pure: recompute on every snapshot and on every
//! tick where `now` moves, since durations and staleness are live.

use serde::Serialize;

use crate::domain::entities::{canonical_order, BrainLog, LiveSession};
use crate::domain::value_objects::{LogType, SessionStatus};

/// Everything a session card needs, derived from one snapshot
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SessionView {
    pub session_id: String,
    pub display_name: String,
    pub status: SessionStatus,
    pub status_message: String,
    pub is_active: bool,
    pub is_stale: bool,
    pub heartbeat_age_ms: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_for_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_request: Option<String>,
    /// Logs attributed to this session, canonical order
    pub logs: Vec<BrainLog>,
}

impl SessionView {
    /// False means the card shows a "no activity yet" placeholder
    pub fn has_activity(&self) -> bool {
        !self.logs.is_empty()
    }
}

/// Classify every live session against the snapshot's logs.
pub fn classify_sessions(logs: &[BrainLog], sessions: &[LiveSession], now_ms: i64) -> Vec<SessionView> {
    let ordered = canonical_order(logs);

    sessions
        .iter()
        .map(|session| {
            let session_logs: Vec<&BrainLog> = ordered
                .iter()
                .copied()
                .filter(|log| log.belongs_to(&session.session_id))
                .collect();

            SessionView {
                session_id: session.session_id.clone(),
                display_name: session.display_name(),
                status: session.status.clone(),
                status_message: status_message(session, &session_logs),
                is_active: session.status.is_active(),
                is_stale: session.is_stale(now_ms),
                heartbeat_age_ms: now_ms.saturating_sub(session.last_heartbeat).max(0),
                active_for_ms: session.active_for_ms(now_ms),
                current_request: session.current_request.clone(),
                logs: session_logs.into_iter().cloned().collect(),
            }
        })
        .collect()
}

/// Logs no session card shows: no session id, or a session that is not
/// in `sessions` (ended, or never listed). These go to the global feed.
pub fn unattributed_logs<'a>(logs: &'a [BrainLog], sessions: &[LiveSession]) -> Vec<&'a BrainLog> {
    canonical_order(logs)
        .into_iter()
        .filter(|log| !sessions.iter().any(|s| log.belongs_to(&s.session_id)))
        .collect()
}

/// `currentStatus`, then the latest `status` log, then the latest
/// `tool_call` log, then a default keyed on the session state.
fn status_message(session: &LiveSession, session_logs: &[&BrainLog]) -> String {
    if let Some(current) = session
        .current_status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        return current.to_string();
    }

    let latest_of = |log_type: LogType| {
        session_logs
            .iter()
            .rev()
            .find(|log| log.log_type == log_type && !log.content.trim().is_empty())
            .map(|log| log.content.trim().to_string())
    };

    latest_of(LogType::Status)
        .or_else(|| latest_of(LogType::ToolCall))
        .unwrap_or_else(|| session.status.default_message().to_string())
}
