//! StatsSnapshot - One complete poll response from the agent's stats API
//!
//! A snapshot is atomic: every derived view of one render pass comes from
//! the same snapshot value, never mixed across polls.

use serde::{Deserialize, Serialize};

use super::{BrainLog, GitCommit, GitContribution, GitInfo, JobLog, LiveSession};
use crate::domain::value_objects::ConnectionStatus;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopSender {
    pub name: String,
    pub count: u64,
}

/// Percentage-like strings as reported by the host (`"42%"`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SystemMetrics {
    pub cpu: String,
    pub memory: String,
    pub disk: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduledJob {
    pub name: String,
    pub interval: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobsSummary {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub running: bool,
    #[serde(default)]
    pub last_upgrade: Option<String>,
    #[serde(default)]
    pub last_orchestrate: Option<String>,
    #[serde(default)]
    pub list: Vec<ScheduledJob>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub name: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub deadline: String,
    #[serde(default)]
    pub days_remaining: i64,
    #[serde(default)]
    pub current: f64,
    /// 0..=100
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub status: MilestoneStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct StatsSnapshot {
    pub status: ConnectionStatus,
    pub uptime: String,
    pub birthday: String,
    pub age: String,
    pub total_messages: u64,
    pub today_messages: u64,
    pub total_sessions: u64,
    pub total_facts: u64,
    pub last_activity: String,
    pub top_senders: Vec<TopSender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<SystemMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jobs: Option<JobsSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<Milestone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brain_logs: Option<Vec<BrainLog>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_logs: Option<Vec<JobLog>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_sessions: Option<Vec<LiveSession>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git: Option<GitInfo>,
    /// Set by the upstream (or by the offline fallback) when it could not
    /// produce real numbers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatsSnapshot {
    /// Placeholder served before the agent has ever answered
    pub fn offline_fallback(birthday: &str) -> Self {
        Self {
            status: ConnectionStatus::Offline,
            uptime: "-".to_string(),
            birthday: birthday.to_string(),
            age: "-".to_string(),
            last_activity: "Unknown".to_string(),
            error: Some("Could not connect to VPS".to_string()),
            ..Self::default()
        }
    }

    pub fn brain_logs(&self) -> &[BrainLog] {
        self.brain_logs.as_deref().unwrap_or_default()
    }

    pub fn job_logs(&self) -> &[JobLog] {
        self.job_logs.as_deref().unwrap_or_default()
    }

    pub fn live_sessions(&self) -> &[LiveSession] {
        self.live_sessions.as_deref().unwrap_or_default()
    }

    pub fn commits(&self) -> &[GitCommit] {
        self.git
            .as_ref()
            .map(|git| git.commits.as_slice())
            .unwrap_or_default()
    }

    pub fn contributions(&self) -> &[GitContribution] {
        self.git
            .as_ref()
            .map(|git| git.contributions.as_slice())
            .unwrap_or_default()
    }
}
