//! Display formatting shared by every renderer

use chrono::{DateTime, Utc};

const BYTE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Binary byte size: `0 B`, `512 B`, `1.5 KB`, `1.0 MB`.
///
/// Whole bytes print without decimals; larger units get one decimal place.
/// Anything past the GB range stays in GB.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, BYTE_UNITS[unit])
}

/// Coarse age: `Just now`, `5m ago`, `2h ago`, `3d ago`.
///
/// Timestamps in the future read as "Just now".
pub fn format_relative(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - then).num_minutes();
    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{}m ago", minutes);
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h ago", hours);
    }
    format!("{}d ago", hours / 24)
}

/// [`format_relative`] for epoch milliseconds
pub fn format_relative_ms(then_ms: i64, now_ms: i64) -> String {
    match (
        DateTime::from_timestamp_millis(then_ms),
        DateTime::from_timestamp_millis(now_ms),
    ) {
        (Some(then), Some(now)) => format_relative(then, now),
        _ => "-".to_string(),
    }
}

/// [`format_relative`] for upstream date strings (RFC 3339).
/// Unparseable input is returned as-is.
pub fn format_relative_str(date: &str, now: DateTime<Utc>) -> String {
    match DateTime::parse_from_rfc3339(date) {
        Ok(then) => format_relative(then.with_timezone(&Utc), now),
        Err(_) => date.to_string(),
    }
}

/// Live duration: `42s`, `3m 7s`, `2h 15m`
pub fn format_duration_ms(ms: i64) -> String {
    let secs = ms.max(0) / 1000;
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}

/// Wall clock for log rows: `3:07 PM` (UTC)
pub fn format_clock(ts_ms: i64) -> String {
    DateTime::from_timestamp_millis(ts_ms)
        .map(|dt| dt.format("%-I:%M %p").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// `1234567` -> `1,234,567`
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Cut `text` to at most `max` characters, marking the cut with `...`
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{}...", cut)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1_048_576), "1.0 MB");
        assert_eq!(format_bytes(2_048_000), "2.0 MB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.0 GB");
        assert_eq!(format_bytes(5 * 1024 * 1024 * 1024 * 1024), "5120.0 GB");
    }

    #[test]
    fn test_format_relative_buckets() {
        let now = Utc::now();
        assert_eq!(format_relative(now - Duration::seconds(30), now), "Just now");
        assert_eq!(format_relative(now - Duration::minutes(5), now), "5m ago");
        assert_eq!(format_relative(now - Duration::hours(2), now), "2h ago");
        assert_eq!(format_relative(now - Duration::days(3), now), "3d ago");
        assert_eq!(format_relative(now + Duration::minutes(10), now), "Just now");
    }

    #[test]
    fn test_format_relative_str() {
        let now = DateTime::parse_from_rfc3339("2026-01-06T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_relative_str("2026-01-06T11:15:00Z", now), "45m ago");
        assert_eq!(format_relative_str("Unknown", now), "Unknown");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration_ms(42_000), "42s");
        assert_eq!(format_duration_ms(187_000), "3m 7s");
        assert_eq!(format_duration_ms(8_100_000), "2h 15m");
        assert_eq!(format_duration_ms(-5), "0s");
    }

    #[test]
    fn test_format_clock() {
        // 2026-01-06T15:07:00Z
        assert_eq!(format_clock(1_767_712_020_000), "3:07 PM");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 80), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
    }
}
