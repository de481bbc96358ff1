//! MetricLevel - Load band for a percentage-like system metric

use serde::Serialize;

use super::descriptor::Tone;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MetricLevel {
    Low,
    Medium,
    High,
}

impl MetricLevel {
    /// `> 80` is high, `> 50` is medium.
    pub fn from_percent(percent: f64) -> Self {
        if percent > 80.0 {
            MetricLevel::High
        } else if percent > 50.0 {
            MetricLevel::Medium
        } else {
            MetricLevel::Low
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            MetricLevel::Low => Tone::Green,
            MetricLevel::Medium => Tone::Amber,
            MetricLevel::High => Tone::Red,
        }
    }
}

/// Parse the leading number out of strings like `"42.5%"` or `"7 %"`.
///
/// Anything unparseable reads as 0, which keeps the gauge empty rather
/// than hiding the card.
pub fn parse_percent(value: &str) -> f64 {
    let trimmed = value.trim();
    let end = trimmed
        .char_indices()
        .find(|(i, c)| !(c.is_ascii_digit() || *c == '.' || (*i == 0 && *c == '-')))
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());
    trimmed[..end].parse::<f64>().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels() {
        assert_eq!(MetricLevel::from_percent(12.0), MetricLevel::Low);
        assert_eq!(MetricLevel::from_percent(50.0), MetricLevel::Low);
        assert_eq!(MetricLevel::from_percent(50.1), MetricLevel::Medium);
        assert_eq!(MetricLevel::from_percent(80.0), MetricLevel::Medium);
        assert_eq!(MetricLevel::from_percent(93.0), MetricLevel::High);
    }

    #[test]
    fn test_parse_percent() {
        assert_eq!(parse_percent("42.5%"), 42.5);
        assert_eq!(parse_percent(" 7 %"), 7.0);
        assert_eq!(parse_percent("n/a"), 0.0);
        assert_eq!(parse_percent(""), 0.0);
    }
}
