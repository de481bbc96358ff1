//! Activity Aggregator ("Brain Command Deck")
//!
//! Rolling counts over two windows relative to `now`, folded into a
//! synthetic 0-100 "brain power" score and eight per-category bars.
//!
//! The score is a presentation heuristic, not a measured quantity. The
//! weights can be tuned; what must hold is that every value saturates at
//! 100, never goes negative, and more recent events never lower it.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::entities::{canonical_order, BrainLog, LiveSession};
use crate::domain::value_objects::LogType;

/// Logs younger than this count as recent.
pub const RECENT_WINDOW_MS: i64 = 60_000;
/// Logs younger than this count as very recent.
pub const VERY_RECENT_WINDOW_MS: i64 = 5_000;
/// How many of the latest cost logs feed `recent_cost` / `total_turns`.
pub const COST_SAMPLE: usize = 5;

const TOOL_CALL_WEIGHT: u64 = 8;
const THINKING_WEIGHT: u64 = 10;
const RESPONSE_WEIGHT: u64 = 5;
const VERY_RECENT_WEIGHT: u64 = 15;
const ACTIVE_SESSION_BONUS: u64 = 30;

/// One of the eight deck bars
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BarKind {
    ToolCalls,
    Thinking,
    Responses,
    Mcp,
    Errors,
    Cost,
    Sessions,
    BrainPower,
}

impl BarKind {
    pub const ALL: [BarKind; 8] = [
        BarKind::ToolCalls,
        BarKind::Thinking,
        BarKind::Responses,
        BarKind::Mcp,
        BarKind::Errors,
        BarKind::Cost,
        BarKind::Sessions,
        BarKind::BrainPower,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BarKind::ToolCalls => "Tool Calls",
            BarKind::Thinking => "Thinking",
            BarKind::Responses => "Responses",
            BarKind::Mcp => "MCP",
            BarKind::Errors => "Errors",
            BarKind::Cost => "Cost",
            BarKind::Sessions => "Sessions",
            BarKind::BrainPower => "Brain Power",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ActivityBar {
    pub kind: BarKind,
    pub label: &'static str,
    /// 0..=100
    pub value: u8,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ActivityDeck {
    pub recent_count: usize,
    pub very_recent_count: usize,
    /// Per log type counts over the recent window, in `LogType` order
    pub counts: BTreeMap<LogType, usize>,
    pub recent_cost: f64,
    pub total_turns: u64,
    pub is_actively_thinking: bool,
    pub active_session_count: usize,
    /// 0..=100
    pub brain_power: u8,
    pub bars: Vec<ActivityBar>,
}

impl ActivityDeck {
    pub fn compute(logs: &[BrainLog], sessions: &[LiveSession], now_ms: i64) -> Self {
        let recent = recent_logs(logs, now_ms);
        let very_recent_count = very_recent_logs(logs, now_ms).len();

        let mut counts: BTreeMap<LogType, usize> = BTreeMap::new();
        for log in &recent {
            *counts.entry(log.log_type.clone()).or_default() += 1;
        }

        let cost_logs: Vec<&BrainLog> = canonical_order(logs)
            .into_iter()
            .filter(|log| log.log_type == LogType::Cost)
            .collect();
        let sample = &cost_logs[cost_logs.len().saturating_sub(COST_SAMPLE)..];
        let recent_cost: f64 = sample.iter().map(|log| log.metadata.cost_usd()).sum();
        let total_turns: u64 = sample
            .iter()
            .fold(0u64, |acc, log| acc.saturating_add(log.metadata.turns()));

        let active_session_count = sessions.iter().filter(|s| s.status.is_active()).count();
        let is_actively_thinking = active_session_count > 0;

        let count = |log_type: &LogType| counts.get(log_type).copied().unwrap_or(0) as u64;

        let raw_power = TOOL_CALL_WEIGHT
            .saturating_mul(count(&LogType::ToolCall))
            .saturating_add(THINKING_WEIGHT.saturating_mul(count(&LogType::Thinking)))
            .saturating_add(RESPONSE_WEIGHT.saturating_mul(count(&LogType::Response)))
            .saturating_add(VERY_RECENT_WEIGHT.saturating_mul(very_recent_count as u64))
            .saturating_add(if is_actively_thinking { ACTIVE_SESSION_BONUS } else { 0 });
        let brain_power = clamp_scaled(raw_power, 1);

        let bars = BarKind::ALL
            .iter()
            .map(|kind| {
                let value = match kind {
                    BarKind::ToolCalls => clamp_scaled(count(&LogType::ToolCall), 15),
                    BarKind::Thinking => clamp_scaled(count(&LogType::Thinking), 20),
                    BarKind::Responses => clamp_scaled(count(&LogType::Response), 15),
                    BarKind::Mcp => clamp_scaled(count(&LogType::Mcp), 20),
                    BarKind::Errors => clamp_scaled(count(&LogType::Error), 50),
                    BarKind::Cost => clamp_fraction(recent_cost * 5000.0),
                    BarKind::Sessions => clamp_scaled(active_session_count as u64, 33),
                    BarKind::BrainPower => brain_power,
                };
                ActivityBar {
                    kind: *kind,
                    label: kind.label(),
                    value,
                }
            })
            .collect();

        Self {
            recent_count: recent.len(),
            very_recent_count,
            counts,
            recent_cost,
            total_turns,
            is_actively_thinking,
            active_session_count,
            brain_power,
            bars,
        }
    }

    pub fn count(&self, log_type: &LogType) -> usize {
        self.counts.get(log_type).copied().unwrap_or(0)
    }

    pub fn bar(&self, kind: BarKind) -> u8 {
        self.bars
            .iter()
            .find(|bar| bar.kind == kind)
            .map(|bar| bar.value)
            .unwrap_or(0)
    }
}

/// Logs with `0 <= now - timestamp < 60s`, canonical order
pub fn recent_logs(logs: &[BrainLog], now_ms: i64) -> Vec<&BrainLog> {
    within(logs, now_ms, RECENT_WINDOW_MS)
}

/// Logs with `0 <= now - timestamp < 5s`, canonical order
pub fn very_recent_logs(logs: &[BrainLog], now_ms: i64) -> Vec<&BrainLog> {
    within(logs, now_ms, VERY_RECENT_WINDOW_MS)
}

fn within(logs: &[BrainLog], now_ms: i64, window_ms: i64) -> Vec<&BrainLog> {
    canonical_order(logs)
        .into_iter()
        .filter(|log| {
            let age = log.age_ms(now_ms);
            (0..window_ms).contains(&age)
        })
        .collect()
}

fn clamp_scaled(count: u64, scale: u64) -> u8 {
    count.saturating_mul(scale).min(100) as u8
}

fn clamp_fraction(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::SessionStatus;
    use serde_json::json;

    const NOW: i64 = 1_700_000_000_000;

    fn log(id: i64, log_type: LogType, age_ms: i64) -> BrainLog {
        BrainLog::new(id, log_type, "x", NOW - age_ms)
    }

    #[test]
    fn test_windows_are_nested() {
        let logs = vec![
            log(1, LogType::Thinking, 1_000),
            log(2, LogType::Thinking, 4_999),
            log(3, LogType::Thinking, 5_000),
            log(4, LogType::Thinking, 59_999),
            log(5, LogType::Thinking, 60_000),
            log(6, LogType::Thinking, -500),
        ];

        let recent: Vec<i64> = recent_logs(&logs, NOW).iter().map(|l| l.id).collect();
        let very: Vec<i64> = very_recent_logs(&logs, NOW).iter().map(|l| l.id).collect();

        assert_eq!(recent, vec![4, 3, 2, 1]);
        assert_eq!(very, vec![2, 1]);
        assert!(very.iter().all(|id| recent.contains(id)));
    }

    #[test]
    fn test_empty_everything_is_zero() {
        let deck = ActivityDeck::compute(&[], &[], NOW);
        assert_eq!(deck.brain_power, 0);
        assert_eq!(deck.bars.len(), 8);
        assert!(deck.bars.iter().all(|bar| bar.value == 0));
        assert!(!deck.is_actively_thinking);
    }

    #[test]
    fn test_thinking_session_gives_baseline() {
        let sessions = vec![LiveSession::new("S", SessionStatus::Thinking, NOW)];
        let deck = ActivityDeck::compute(&[], &sessions, NOW);
        assert!(deck.is_actively_thinking);
        assert_eq!(deck.active_session_count, 1);
        assert_eq!(deck.brain_power, 30);
        assert_eq!(deck.bar(BarKind::Sessions), 33);
    }

    #[test]
    fn test_brain_power_formula() {
        let logs = vec![
            log(1, LogType::ToolCall, 30_000),
            log(2, LogType::Thinking, 30_000),
            log(3, LogType::Response, 30_000),
            log(4, LogType::User, 1_000),
        ];
        let deck = ActivityDeck::compute(&logs, &[], NOW);
        // 8 + 10 + 5 + 15 * 1 very recent
        assert_eq!(deck.brain_power, 38);
        assert_eq!(deck.count(&LogType::User), 1);
    }

    #[test]
    fn test_brain_power_saturates() {
        let logs: Vec<BrainLog> = (0..200).map(|i| log(i, LogType::ToolCall, 100)).collect();
        let sessions = vec![LiveSession::new("S", SessionStatus::Responding, NOW)];
        let deck = ActivityDeck::compute(&logs, &sessions, NOW);
        assert_eq!(deck.brain_power, 100);
        assert!(deck.bars.iter().all(|bar| bar.value <= 100));
    }

    #[test]
    fn test_more_events_never_lower_score() {
        let mut logs = Vec::new();
        let mut previous = 0;
        for i in 0..20 {
            let log_type = match i % 3 {
                0 => LogType::ToolCall,
                1 => LogType::Thinking,
                _ => LogType::Error,
            };
            logs.push(log(i, log_type, (i * 700) % 70_000));
            let power = ActivityDeck::compute(&logs, &[], NOW).brain_power;
            assert!(power >= previous);
            previous = power;
        }
    }

    #[test]
    fn test_cost_uses_last_five_cost_logs() {
        let logs: Vec<BrainLog> = (0..7)
            .map(|i| {
                log(i, LogType::Cost, 600_000 - i * 1_000)
                    .with_metadata("costUsd", json!(0.001 * (i + 1) as f64))
                    .with_metadata("turns", json!(2))
            })
            .chain(std::iter::once(log(99, LogType::Cost, 1)))
            .collect();

        let deck = ActivityDeck::compute(&logs, &[], NOW);
        // ids 3..=6 plus id 99 (no metadata)
        let expected = 0.004 + 0.005 + 0.006 + 0.007;
        assert!((deck.recent_cost - expected).abs() < 1e-9);
        assert_eq!(deck.total_turns, 8);
        assert_eq!(deck.bar(BarKind::Cost), 100);
    }

    #[test]
    fn test_counts_serialize_in_stable_order() {
        let logs = vec![
            log(1, LogType::Error, 10),
            log(2, LogType::Other("zeta".to_string()), 20),
            log(3, LogType::ToolCall, 30),
            log(4, LogType::Thinking, 40),
            log(5, LogType::ToolCall, 50),
        ];
        let deck = ActivityDeck::compute(&logs, &[], NOW);

        let keys: Vec<&LogType> = deck.counts.keys().collect();
        assert_eq!(
            keys,
            vec![
                &LogType::ToolCall,
                &LogType::Thinking,
                &LogType::Error,
                &LogType::Other("zeta".to_string())
            ]
        );

        let json = serde_json::to_string(&deck.counts).unwrap();
        assert_eq!(json, r#"{"tool_call":2,"thinking":1,"error":1,"zeta":1}"#);
    }

    #[test]
    fn test_error_bar_scale() {
        let logs = vec![log(1, LogType::Error, 10)];
        let deck = ActivityDeck::compute(&logs, &[], NOW);
        assert_eq!(deck.bar(BarKind::Errors), 50);
        assert_eq!(deck.bar(BarKind::BrainPower), deck.brain_power);
    }
}
