//! Terminal drawing for dashboard widgets

use chrono::{DateTime, Utc};
use colored::{Color, ColoredString, Colorize};

use billdeck::domain::{ChangelogEntry, ContributionGrid, ContributionSummary, Tone};
use billdeck::format::{format_bytes, format_relative};
use billdeck::render::{DashboardView, JobRow, LogRow, SessionCard};
use billdeck::{Descriptor, MetricLevel, OutboxFile};

const BAR_WIDTH: usize = 20;

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Accent => Color::TrueColor {
            r: 255,
            g: 122,
            b: 69,
        },
        Tone::Green => Color::Green,
        Tone::Purple => Color::Magenta,
        Tone::Blue => Color::Blue,
        Tone::Cyan => Color::Cyan,
        Tone::Red => Color::Red,
        Tone::Amber => Color::Yellow,
        Tone::Indigo => Color::BrightBlue,
        Tone::Pink => Color::BrightMagenta,
        Tone::Bright => Color::BrightWhite,
        Tone::Muted => Color::BrightBlack,
    }
}

fn badge(descriptor: &Descriptor) -> ColoredString {
    format!("{} {}", descriptor.icon, descriptor.label).color(tone_color(descriptor.tone))
}

/// `████░░░░` for a 0..=100 value
pub fn bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Fetch status line under the header
#[derive(Debug, Clone, Default)]
pub struct FetchStatus {
    pub live: bool,
    pub last_fetch: Option<DateTime<Utc>>,
    pub fetch_error: Option<String>,
}

pub fn print_dashboard(view: &DashboardView, status: &FetchStatus, now: DateTime<Utc>) {
    // Header
    println!(
        "{}  {}",
        "BILL".bold(),
        badge(&view.header.badge)
    );
    if let Some(born) = &view.header.born {
        println!("{}", born.dimmed());
    }
    print_fetch_status(status, now);
    println!();

    // Hero stats
    let cards: Vec<String> = view
        .stats
        .iter()
        .map(|card| {
            let value = match card.suffix {
                Some(suffix) => format!("{} {}", card.value, suffix),
                None => card.value.clone(),
            };
            let value = if card.accent {
                value.color(tone_color(Tone::Accent)).bold()
            } else {
                value.bold()
            };
            format!("{} {}", card.label.dimmed(), value)
        })
        .collect();
    println!("{}", cards.join("   "));

    if let Some(system) = &view.system {
        println!();
        for gauge in system {
            let color = tone_color(gauge.level.tone());
            let level = match gauge.level {
                MetricLevel::High => "high",
                MetricLevel::Medium => "medium",
                MetricLevel::Low => "ok",
            };
            println!(
                "  {:<7} {} {:>6} {}",
                gauge.label,
                bar(gauge.width, BAR_WIDTH).color(color),
                gauge.value,
                level.dimmed()
            );
        }
    }

    if let Some(milestone) = &view.milestone {
        println!();
        println!(
            "{} {}  {} / {}  {}",
            "🎯".bold(),
            milestone.name.bold(),
            milestone.current.color(tone_color(Tone::Accent)),
            milestone.target,
            format!("{} days left ({})", milestone.days_remaining, milestone.deadline).dimmed()
        );
        println!("   {}", bar(milestone.width, BAR_WIDTH * 2).color(tone_color(Tone::Accent)));
    }

    // Activity deck
    let deck = &view.deck;
    println!();
    let thinking = if deck.is_actively_thinking {
        format!("thinking ({} active)", deck.active_session_count)
            .color(tone_color(Tone::Purple))
    } else {
        "idle".dimmed()
    };
    println!(
        "{} {:>3}%  {}  {}",
        "Brain power".bold(),
        deck.brain_power,
        bar(deck.brain_power as f64, BAR_WIDTH).color(tone_color(Tone::Accent)),
        thinking
    );
    for activity in &deck.bars {
        println!(
            "  {:<10} {} {:>3}",
            activity.label,
            bar(activity.value as f64, BAR_WIDTH),
            activity.value
        );
    }
    println!(
        "  {}",
        format!(
            "{} logs in the last minute · ${:.4} over {} turns",
            deck.recent_count, deck.recent_cost, deck.total_turns
        )
        .dimmed()
    );

    if !view.sessions.is_empty() {
        println!();
        print_sessions(&view.sessions);
    }

    if !view.feed.is_empty() {
        println!();
        println!("{}", "Brain feed".bold());
        print_log_rows(&view.feed);
        if view.feed.len() < view.feed_total {
            println!(
                "  {}",
                format!("{} more", view.feed_total - view.feed.len()).dimmed()
            );
        }
    }

    if let Some(jobs) = &view.jobs {
        println!();
        let state = if jobs.enabled {
            jobs.badge.green()
        } else {
            jobs.badge.yellow()
        };
        println!("{} {}", "Scheduled jobs".bold(), state);
        for (name, interval) in &jobs.rows {
            println!("  {:<20} {}", name, interval.dimmed());
        }
    }

    if !view.top_senders.is_empty() {
        println!();
        println!("{}", "Top senders".bold());
        for sender in &view.top_senders {
            println!(
                "  {:<16} {} {}",
                sender.name,
                bar(sender.width, BAR_WIDTH).color(tone_color(Tone::Blue)),
                sender.count
            );
        }
    }
}

pub fn print_fetch_status(status: &FetchStatus, now: DateTime<Utc>) {
    if let Some(error) = &status.fetch_error {
        println!("{} {}", "⚠".red(), error.red());
    }
    match status.last_fetch {
        Some(at) if status.live => {
            println!("{}", format!("Updated {}", format_relative(at, now)).dimmed())
        }
        _ => println!("{}", "No data from Bill yet".dimmed()),
    }
}

pub fn print_sessions(cards: &[SessionCard]) {
    println!("{}", "Live sessions".bold());
    for card in cards {
        let stale = if card.stale {
            format!(" stale, last heartbeat {}", card.heartbeat).red().to_string()
        } else {
            String::new()
        };
        let duration = card
            .duration
            .as_deref()
            .map(|d| format!(" {}", d).dimmed().to_string())
            .unwrap_or_default();

        println!(
            "  {} {}{}{}",
            card.name.bold(),
            badge(&card.badge),
            duration,
            stale
        );
        println!("    {}", card.message.italic());
        if let Some(request) = &card.request {
            println!("    {} {}", "›".dimmed(), request.dimmed());
        }

        match card.placeholder {
            Some(placeholder) => println!("    {}", placeholder.dimmed()),
            None => {
                for row in &card.rows {
                    print_log_row(row, "    ");
                }
                if card.rows.len() < card.total_rows {
                    println!(
                        "    {}",
                        format!("{} earlier entries", card.total_rows - card.rows.len()).dimmed()
                    );
                }
            }
        }
    }
}

pub fn print_log_rows(rows: &[LogRow]) {
    for row in rows {
        print_log_row(row, "  ");
    }
}

fn print_log_row(row: &LogRow, indent: &str) {
    println!(
        "{}{:>8} {} {}",
        indent,
        row.clock.dimmed(),
        badge(&row.descriptor),
        row.content
    );
    if let Some(detail) = &row.detail {
        println!("{}         {}", indent, detail.dimmed());
    }
}

pub fn print_job_rows(rows: &[JobRow], total: usize) {
    if rows.is_empty() {
        println!("No job runs recorded.");
        return;
    }

    println!("{}", "Job history".bold());
    for row in rows {
        println!(
            "  {:>8} {} {} {}",
            row.clock.dimmed(),
            badge(&row.job),
            badge(&row.status),
            row.content
        );
    }
    if rows.len() < total {
        println!("  {}", format!("{} older runs", total - rows.len()).dimmed());
    }
}

pub fn print_changelog(entries: &[ChangelogEntry]) {
    if entries.is_empty() {
        println!("No commits in the latest snapshot.");
        return;
    }

    println!("{}", "Changelog".bold());
    for entry in entries {
        let descriptor = entry.commit_type.descriptor();
        println!(
            "  {} {:<10} {}  {}",
            entry.short_hash.dimmed(),
            descriptor.label.color(tone_color(descriptor.tone)).bold(),
            entry.subject,
            format!("{} · {}", entry.author, entry.relative_date).dimmed()
        );
    }
}

pub fn print_contributions(summary: &ContributionSummary, grid: &ContributionGrid) {
    println!(
        "{} {} commits on {} days",
        "Contributions".bold(),
        summary.total_commits.to_string().green(),
        summary.active_days
    );
    if grid.weeks.is_empty() {
        return;
    }

    // Month labels above their first week column
    let mut labels = String::new();
    for month in &grid.months {
        let column = month.column * 2;
        if labels.chars().count() < column {
            labels.push_str(&" ".repeat(column - labels.chars().count()));
        }
        labels.push_str(&month.label);
    }
    println!("  {}", labels.dimmed());

    let shades = [
        Color::BrightBlack,
        Color::TrueColor { r: 14, g: 68, b: 41 },
        Color::TrueColor { r: 0, g: 109, b: 50 },
        Color::TrueColor { r: 38, g: 166, b: 65 },
        Color::TrueColor { r: 57, g: 211, b: 83 },
    ];
    for weekday in 0..7 {
        let mut line = String::new();
        for week in &grid.weeks {
            let cell = match week.get(weekday) {
                Some(cell) if cell.day.is_some() => {
                    let shade = shades[(cell.level as usize).min(shades.len() - 1)];
                    "■ ".color(shade).to_string()
                }
                _ => "  ".to_string(),
            };
            line.push_str(&cell);
        }
        println!("  {}", line);
    }
}

pub fn print_outbox(files: &[OutboxFile], now: DateTime<Utc>) {
    if files.is_empty() {
        println!("Outbox is empty.");
        return;
    }

    println!("{}", "Outbox".bold());
    for file in files {
        println!(
            "  {} {} {}",
            file.name.cyan(),
            format_bytes(file.size).dimmed(),
            format_relative(file.created, now).dimmed()
        );
        if let Some(description) = &file.description {
            println!("    {}", description);
        }
    }
}
