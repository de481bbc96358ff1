//! Render Layer - view models for the dashboard widgets
//!
//! Pure mapping from one snapshot, its derived values and local toggle
//! state to widgets. Thresholds and classification live in the domain
//! services; this module only picks descriptors and formats values.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{
    classify_sessions, parse_percent, unattributed_logs, ActivityDeck, BrainLog, ConnectionStatus,
    Descriptor, JobLog, LogType, MetricLevel, SessionView, StatsSnapshot,
};
use crate::format::{
    format_clock, format_duration_ms, format_relative_ms, format_relative_str, group_thousands,
    truncate,
};

/// Rows shown in a collapsed session card
pub const COLLAPSED_SESSION_ROWS: usize = 3;
/// Rows shown in the collapsed global feed and job history
pub const COLLAPSED_FEED_ROWS: usize = 20;
/// Tool input preview length
pub const INPUT_PREVIEW_CHARS: usize = 80;
/// Milestone bars never render thinner than this
pub const MIN_MILESTONE_WIDTH: f64 = 2.0;

pub const FEED_WIDGET: &str = "feed";
pub const JOB_HISTORY_WIDGET: &str = "job_history";

/// Widget key for one session card
pub fn session_widget(session_id: &str) -> String {
    format!("session:{}", session_id)
}

/// Per-widget expand/collapse toggles. Ephemeral, never part of the
/// derived model.
#[derive(Debug, Clone, Default)]
pub struct ExpandState {
    expanded: HashSet<String>,
}

impl ExpandState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip a widget; returns the new state
    pub fn toggle(&mut self, key: &str) -> bool {
        if self.expanded.remove(key) {
            false
        } else {
            self.expanded.insert(key.to_string());
            true
        }
    }

    pub fn expand(&mut self, key: &str) {
        self.expanded.insert(key.to_string());
    }

    pub fn is_expanded(&self, key: &str) -> bool {
        self.expanded.contains(key)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HeaderView {
    pub status: ConnectionStatus,
    pub badge: Descriptor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub born: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<&'static str>,
    pub accent: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricGauge {
    pub label: &'static str,
    pub value: String,
    pub level: MetricLevel,
    /// 0..=100
    pub width: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MilestoneBanner {
    pub name: String,
    pub current: String,
    pub target: String,
    pub deadline: String,
    pub days_remaining: i64,
    pub width: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobsCard {
    pub enabled: bool,
    pub badge: &'static str,
    pub rows: Vec<(String, String)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SenderBar {
    pub name: String,
    pub count: u64,
    /// Relative to the top sender, 0..=100
    pub width: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogRow {
    pub id: i64,
    pub descriptor: Descriptor,
    pub clock: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl LogRow {
    pub fn from_log(log: &BrainLog) -> Self {
        let detail = match log.log_type {
            LogType::ToolCall => log
                .metadata
                .input()
                .map(|input| truncate(&input, INPUT_PREVIEW_CHARS)),
            _ => None,
        };

        Self {
            id: log.id,
            descriptor: log.log_type.descriptor(),
            clock: format_clock(log.timestamp),
            content: log.content.clone(),
            detail,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JobRow {
    pub id: i64,
    pub job: Descriptor,
    pub status: Descriptor,
    pub clock: String,
    pub content: String,
}

impl JobRow {
    pub fn from_log(log: &JobLog) -> Self {
        Self {
            id: log.id,
            job: log.job_type.descriptor(),
            status: log.status.descriptor(),
            clock: format_clock(log.timestamp),
            content: log.content.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionCard {
    pub key: String,
    pub name: String,
    pub badge: Descriptor,
    pub message: String,
    pub stale: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    pub heartbeat: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<String>,
    pub expanded: bool,
    pub total_rows: usize,
    pub rows: Vec<LogRow>,
    /// Set when the session has no logs yet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
}

impl SessionCard {
    pub fn from_view(view: &SessionView, expand: &ExpandState, now_ms: i64) -> Self {
        let key = session_widget(&view.session_id);
        let expanded = expand.is_expanded(&key);
        let skip = if expanded {
            0
        } else {
            view.logs.len().saturating_sub(COLLAPSED_SESSION_ROWS)
        };

        Self {
            name: view.display_name.clone(),
            badge: view.status.descriptor(),
            message: view.status_message.clone(),
            stale: view.is_stale,
            duration: view.active_for_ms.map(format_duration_ms),
            heartbeat: format_relative_ms(now_ms - view.heartbeat_age_ms, now_ms),
            request: view.current_request.clone(),
            expanded,
            total_rows: view.logs.len(),
            rows: view.logs.iter().skip(skip).map(LogRow::from_log).collect(),
            placeholder: (!view.has_activity()).then_some("No activity yet"),
            key,
        }
    }
}

/// Everything the dashboard draws for one snapshot
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub header: HeaderView,
    pub stats: Vec<StatCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<Vec<MetricGauge>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<MilestoneBanner>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jobs: Option<JobsCard>,
    pub top_senders: Vec<SenderBar>,
    pub deck: ActivityDeck,
    pub sessions: Vec<SessionCard>,
    pub feed: Vec<LogRow>,
    pub feed_total: usize,
    pub job_history: Vec<JobRow>,
    pub job_history_total: usize,
}

impl DashboardView {
    pub fn build(snapshot: &StatsSnapshot, now: DateTime<Utc>, expand: &ExpandState) -> Self {
        let now_ms = now.timestamp_millis();
        let logs = snapshot.brain_logs();
        let sessions = snapshot.live_sessions();

        let session_views = classify_sessions(logs, sessions, now_ms);
        let deck = ActivityDeck::compute(logs, sessions, now_ms);

        // Global feed: newest first
        let feed_logs: Vec<&BrainLog> = unattributed_logs(logs, sessions)
            .into_iter()
            .rev()
            .collect();
        let feed_limit = if expand.is_expanded(FEED_WIDGET) {
            feed_logs.len()
        } else {
            COLLAPSED_FEED_ROWS
        };

        let mut job_logs: Vec<&JobLog> = snapshot.job_logs().iter().collect();
        job_logs.sort_by_key(|log| std::cmp::Reverse((log.timestamp, log.id)));
        let job_limit = if expand.is_expanded(JOB_HISTORY_WIDGET) {
            job_logs.len()
        } else {
            COLLAPSED_FEED_ROWS
        };

        Self {
            header: header(snapshot),
            stats: stat_cards(snapshot, now),
            system: snapshot.system.as_ref().map(|system| {
                vec![
                    gauge("CPU", &system.cpu),
                    gauge("Memory", &system.memory),
                    gauge("Disk", &system.disk),
                ]
            }),
            milestone: snapshot.milestone.as_ref().map(|m| MilestoneBanner {
                name: m.name.clone(),
                current: format!("${}", m.current),
                target: m.target.clone(),
                deadline: m.deadline.clone(),
                days_remaining: m.days_remaining,
                width: m.progress.clamp(MIN_MILESTONE_WIDTH, 100.0),
            }),
            jobs: snapshot.jobs.as_ref().map(|jobs| JobsCard {
                enabled: jobs.enabled,
                badge: if jobs.enabled { "Active" } else { "Paused" },
                rows: jobs
                    .list
                    .iter()
                    .map(|job| (job.name.clone(), job.interval.clone()))
                    .collect(),
            }),
            top_senders: sender_bars(snapshot),
            deck,
            sessions: session_views
                .iter()
                .map(|view| SessionCard::from_view(view, expand, now_ms))
                .collect(),
            feed_total: feed_logs.len(),
            feed: feed_logs
                .into_iter()
                .take(feed_limit)
                .map(LogRow::from_log)
                .collect(),
            job_history_total: job_logs.len(),
            job_history: job_logs
                .into_iter()
                .take(job_limit)
                .map(JobRow::from_log)
                .collect(),
        }
    }
}

fn header(snapshot: &StatsSnapshot) -> HeaderView {
    let born = (!snapshot.birthday.is_empty())
        .then(|| format!("Born {} · {} old", snapshot.birthday, snapshot.age));
    HeaderView {
        status: snapshot.status,
        badge: snapshot.status.descriptor(),
        born,
    }
}

fn stat_cards(snapshot: &StatsSnapshot, now: DateTime<Utc>) -> Vec<StatCard> {
    let or_dash = |s: &str| if s.is_empty() { "-".to_string() } else { s.to_string() };
    vec![
        StatCard {
            label: "Uptime",
            value: or_dash(&snapshot.uptime),
            suffix: None,
            accent: snapshot.status.is_online(),
        },
        StatCard {
            label: "Today",
            value: snapshot.today_messages.to_string(),
            suffix: Some("msgs"),
            accent: false,
        },
        StatCard {
            label: "Total",
            value: group_thousands(snapshot.total_messages),
            suffix: Some("msgs"),
            accent: false,
        },
        StatCard {
            label: "Active",
            value: if snapshot.last_activity.is_empty() {
                "-".to_string()
            } else {
                format_relative_str(&snapshot.last_activity, now)
            },
            suffix: None,
            accent: false,
        },
    ]
}

fn gauge(label: &'static str, value: &str) -> MetricGauge {
    let percent = parse_percent(value);
    MetricGauge {
        label,
        value: value.to_string(),
        level: MetricLevel::from_percent(percent),
        width: percent.clamp(0.0, 100.0),
    }
}

fn sender_bars(snapshot: &StatsSnapshot) -> Vec<SenderBar> {
    let top = snapshot
        .top_senders
        .iter()
        .map(|s| s.count)
        .max()
        .unwrap_or(0)
        .max(1) as f64;
    snapshot
        .top_senders
        .iter()
        .map(|sender| SenderBar {
            name: sender.name.clone(),
            count: sender.count,
            width: (sender.count as f64 / top * 100.0).clamp(0.0, 100.0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        JobStatus, JobType, LiveSession, Milestone, MilestoneStatus, SessionStatus, SystemMetrics,
        TopSender,
    };
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp_millis(1_767_712_020_000).unwrap()
    }

    fn snapshot() -> StatsSnapshot {
        let now_ms = now().timestamp_millis();
        let mut logs: Vec<BrainLog> = (0..5)
            .map(|i| {
                BrainLog::new(i, LogType::Thinking, format!("step {i}"), now_ms - 10_000 + i * 100)
                    .with_session("agent:main:topic_7")
            })
            .collect();
        logs.push(
            BrainLog::new(50, LogType::ToolCall, "Bash", now_ms - 500)
                .with_metadata("input", json!("x".repeat(120))),
        );

        StatsSnapshot {
            status: ConnectionStatus::Online,
            uptime: "2d 3h".to_string(),
            birthday: "January 2, 2026".to_string(),
            age: "4 days".to_string(),
            total_messages: 12_345,
            top_senders: vec![
                TopSender { name: "alex".to_string(), count: 40 },
                TopSender { name: "sam".to_string(), count: 10 },
            ],
            system: Some(SystemMetrics {
                cpu: "91%".to_string(),
                memory: "55%".to_string(),
                disk: "12%".to_string(),
            }),
            milestone: Some(Milestone {
                name: "First dollar".to_string(),
                target: "$100".to_string(),
                deadline: "Feb 1".to_string(),
                days_remaining: 26,
                current: 0.0,
                progress: 0.0,
                status: MilestoneStatus::InProgress,
            }),
            brain_logs: Some(logs),
            job_logs: Some(vec![
                JobLog {
                    id: 1,
                    job_type: JobType::Upgrade,
                    content: "old".to_string(),
                    status: JobStatus::Completed,
                    timestamp: now_ms - 100_000,
                },
                JobLog {
                    id: 2,
                    job_type: JobType::Other("backup".to_string()),
                    content: "new".to_string(),
                    status: JobStatus::Error,
                    timestamp: now_ms - 1_000,
                },
            ]),
            live_sessions: Some(vec![
                LiveSession::new("agent:main:topic_7", SessionStatus::Thinking, now_ms - 2_000),
                LiveSession::new("agent:main:dm", SessionStatus::Idle, now_ms - 120_000),
            ]),
            ..StatsSnapshot::default()
        }
    }

    #[test]
    fn test_dashboard_widgets() {
        let view = DashboardView::build(&snapshot(), now(), &ExpandState::new());

        assert_eq!(view.header.badge.label, "Online");
        assert_eq!(view.header.born.as_deref(), Some("Born January 2, 2026 · 4 days old"));
        assert_eq!(view.stats[2].value, "12,345");

        let system = view.system.unwrap();
        assert_eq!(system[0].level, MetricLevel::High);
        assert_eq!(system[1].level, MetricLevel::Medium);
        assert_eq!(system[2].level, MetricLevel::Low);

        assert_eq!(view.milestone.unwrap().width, MIN_MILESTONE_WIDTH);
        assert_eq!(view.top_senders[0].width, 100.0);
        assert_eq!(view.top_senders[1].width, 25.0);

        assert_eq!(view.job_history[0].content, "new");
        assert_eq!(view.job_history[0].job.label, "backup");
    }

    #[test]
    fn test_session_cards_collapse_and_placeholder() {
        let snapshot = snapshot();
        let view = DashboardView::build(&snapshot, now(), &ExpandState::new());

        let busy = &view.sessions[0];
        assert_eq!(busy.name, "#7");
        assert!(!busy.expanded);
        assert_eq!(busy.total_rows, 5);
        assert_eq!(busy.rows.len(), COLLAPSED_SESSION_ROWS);
        assert_eq!(busy.rows.last().unwrap().content, "step 4");

        let quiet = &view.sessions[1];
        assert!(quiet.stale);
        assert_eq!(quiet.placeholder, Some("No activity yet"));

        let mut expand = ExpandState::new();
        assert!(expand.toggle(&session_widget("agent:main:topic_7")));
        let view = DashboardView::build(&snapshot, now(), &expand);
        assert_eq!(view.sessions[0].rows.len(), 5);
    }

    #[test]
    fn test_feed_only_unattributed_with_preview() {
        let view = DashboardView::build(&snapshot(), now(), &ExpandState::new());
        assert_eq!(view.feed_total, 1);
        let row = &view.feed[0];
        assert_eq!(row.descriptor.label, "Tool");
        assert_eq!(row.detail.as_ref().unwrap().len(), INPUT_PREVIEW_CHARS + 3);
    }

    #[test]
    fn test_log_of_unlisted_session_shows_in_feed() {
        let mut snapshot = snapshot();
        let now_ms = now().timestamp_millis();
        if let Some(logs) = snapshot.brain_logs.as_mut() {
            logs.push(
                BrainLog::new(60, LogType::Error, "gone", now_ms - 200)
                    .with_session("agent:main:topic_9"),
            );
        }

        let view = DashboardView::build(&snapshot, now(), &ExpandState::new());
        let card_rows: usize = view.sessions.iter().map(|card| card.total_rows).sum();

        assert_eq!(view.feed_total, 2);
        assert_eq!(view.feed[0].content, "gone");
        assert_eq!(card_rows + view.feed_total, 7);
        assert_eq!(view.deck.count(&LogType::Error), 1);
    }

    #[test]
    fn test_empty_snapshot_renders() {
        let view = DashboardView::build(&StatsSnapshot::default(), now(), &ExpandState::new());
        assert!(view.system.is_none());
        assert!(view.sessions.is_empty());
        assert!(view.feed.is_empty());
        assert_eq!(view.deck.brain_power, 0);
        assert_eq!(view.stats[0].value, "-");
    }

    #[test]
    fn test_toggle_round_trip() {
        let mut expand = ExpandState::new();
        assert!(expand.toggle(FEED_WIDGET));
        assert!(expand.is_expanded(FEED_WIDGET));
        assert!(!expand.toggle(FEED_WIDGET));
        assert!(!expand.is_expanded(FEED_WIDGET));
    }
}
