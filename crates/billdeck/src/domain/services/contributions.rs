//! Contributions - Week-column commit grid, GitHub style
//!
//! Columns are weeks starting on Sunday, rows are weekdays. The first
//! column is padded so the first day lands on its weekday row.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::domain::entities::GitContribution;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ContributionSummary {
    pub total_commits: u64,
    pub active_days: usize,
}

impl ContributionSummary {
    pub fn from_days(days: &[GitContribution]) -> Self {
        Self {
            total_commits: days.iter().map(|d| d.count as u64).sum(),
            active_days: days.iter().filter(|d| d.count > 0).count(),
        }
    }
}

/// One cell; `None` day means a padding cell before the first date
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ContributionCell {
    pub day: Option<GitContribution>,
    /// 0 = no commits, 1..=4 by quartile of the busiest day
    pub level: u8,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MonthLabel {
    pub label: String,
    pub column: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ContributionGrid {
    pub weeks: Vec<Vec<ContributionCell>>,
    pub months: Vec<MonthLabel>,
    pub max_count: u32,
}

impl ContributionGrid {
    pub fn build(days: &[GitContribution]) -> Self {
        let max_count = days.iter().map(|d| d.count).max().unwrap_or(0).max(1);

        let Some(first) = days.first() else {
            return Self {
                weeks: Vec::new(),
                months: Vec::new(),
                max_count,
            };
        };

        let padding = parse_date(&first.date)
            .map(|date| date.weekday().num_days_from_sunday() as usize)
            .unwrap_or(0);

        let mut weeks: Vec<Vec<ContributionCell>> = Vec::new();
        let mut current: Vec<ContributionCell> = (0..padding)
            .map(|_| ContributionCell { day: None, level: 0 })
            .collect();

        for day in days {
            current.push(ContributionCell {
                day: Some(day.clone()),
                level: intensity_level(day.count, max_count),
            });
            if current.len() == 7 {
                weeks.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            weeks.push(current);
        }

        let mut months = Vec::new();
        let mut last_month = String::new();
        for (column, week) in weeks.iter().enumerate() {
            let first_date = week
                .iter()
                .filter_map(|cell| cell.day.as_ref())
                .find_map(|day| parse_date(&day.date));
            if let Some(date) = first_date {
                let label = date.format("%b").to_string();
                if label != last_month {
                    months.push(MonthLabel {
                        label: label.clone(),
                        column,
                    });
                    last_month = label;
                }
            }
        }

        Self {
            weeks,
            months,
            max_count,
        }
    }
}

/// Quartile bucket of `count / max_count`
pub fn intensity_level(count: u32, max_count: u32) -> u8 {
    if count == 0 {
        return 0;
    }
    let intensity = (count as f64 / max_count.max(1) as f64).min(1.0);
    if intensity <= 0.25 {
        1
    } else if intensity <= 0.5 {
        2
    } else if intensity <= 0.75 {
        3
    } else {
        4
    }
}

fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(date: &str, count: u32) -> GitContribution {
        GitContribution {
            date: date.to_string(),
            count,
        }
    }

    #[test]
    fn test_summary() {
        let days = vec![day("2026-01-01", 3), day("2026-01-02", 0), day("2026-01-03", 2)];
        let summary = ContributionSummary::from_days(&days);
        assert_eq!(summary.total_commits, 5);
        assert_eq!(summary.active_days, 2);
    }

    #[test]
    fn test_grid_pads_to_sunday() {
        // 2026-01-01 is a Thursday
        let days: Vec<GitContribution> = (1..=10).map(|d| day(&format!("2026-01-{d:02}"), d)).collect();
        let grid = ContributionGrid::build(&days);

        assert_eq!(grid.weeks.len(), 2);
        assert_eq!(grid.weeks[0].len(), 7);
        assert!(grid.weeks[0][..4].iter().all(|cell| cell.day.is_none()));
        assert_eq!(grid.weeks[0][4].day.as_ref().unwrap().date, "2026-01-01");
        assert_eq!(grid.weeks[1].len(), 7);
        assert_eq!(grid.months, vec![MonthLabel { label: "Jan".to_string(), column: 0 }]);
    }

    #[test]
    fn test_month_labels_change() {
        let days = vec![day("2026-01-31", 1), day("2026-02-01", 1), day("2026-02-08", 1)];
        let grid = ContributionGrid::build(&days);
        let labels: Vec<&str> = grid.months.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["Jan", "Feb"]);
    }

    #[test]
    fn test_intensity_levels() {
        assert_eq!(intensity_level(0, 8), 0);
        assert_eq!(intensity_level(2, 8), 1);
        assert_eq!(intensity_level(4, 8), 2);
        assert_eq!(intensity_level(6, 8), 3);
        assert_eq!(intensity_level(8, 8), 4);
    }

    #[test]
    fn test_empty_grid() {
        let grid = ContributionGrid::build(&[]);
        assert!(grid.weeks.is_empty());
        assert!(grid.months.is_empty());
    }
}
