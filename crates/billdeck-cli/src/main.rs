//! Billdeck CLI - Watch the Bill agent from the terminal
//!
//! Talks to a billdeck-server; every widget is derived locally from the
//! polled snapshot with the billdeck library.

mod api;
mod config;
mod render;

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::Password;

use billdeck::domain::changelog;
use billdeck::render::{
    session_widget, DashboardView, ExpandState, FEED_WIDGET, JOB_HISTORY_WIDGET,
};
use billdeck::{
    Applied, ContributionGrid, ContributionSummary, LogType, SnapshotStore, StatsSnapshot,
};

use api::{DeckClient, StatsResponse};
use config::Config;
use render::FetchStatus;

#[derive(Parser)]
#[command(name = "billdeck")]
#[command(about = "Billdeck CLI - Watch the Bill agent from the terminal", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Login and store a session token
    Login {
        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
        /// Server URL (saved for later commands)
        #[arg(short, long)]
        url: Option<String>,
    },

    /// Forget the stored session token
    Logout,

    /// Print the dashboard once
    Status {
        /// Show the whole brain feed
        #[arg(short, long)]
        all: bool,
    },

    /// Redraw the dashboard on every poll
    Watch {
        /// Seconds between polls (defaults to the configured interval)
        #[arg(short, long)]
        interval: Option<u64>,
    },

    /// Live sessions with their logs
    Sessions {
        /// Show every log instead of the latest few
        #[arg(short, long)]
        expand: bool,
    },

    /// Unattributed brain logs, newest first
    Logs {
        /// Max rows
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Only this log type (tool_call, thinking, response, ...)
        #[arg(short = 't', long)]
        r#type: Option<String>,
    },

    /// Scheduled job runs, newest first
    Jobs {
        /// Show every run instead of the latest 20
        #[arg(short, long)]
        all: bool,
    },

    /// Conventional-commit changelog
    Changelog {
        /// Max entries
        #[arg(short, long, default_value = "30")]
        limit: usize,
    },

    /// Commit contribution grid
    Contributions,

    /// Ask the server to poll Bill now
    Refresh,

    /// Inbox (files for Bill)
    Inbox {
        #[command(subcommand)]
        action: InboxAction,
    },

    /// Outbox (files from Bill)
    Outbox {
        #[command(subcommand)]
        action: OutboxAction,
    },

    /// Show current configuration
    Config,
}

#[derive(Subcommand)]
enum InboxAction {
    /// Upload a file (max 10 MiB)
    Upload {
        /// Local file path
        path: PathBuf,
    },
}

#[derive(Subcommand)]
enum OutboxAction {
    /// List files Bill has published
    List,
    /// Download a file
    Download {
        /// Outbox file name
        name: String,
        /// Where to write (defaults to the file name in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Login { password, url } => cmd_login(password, url).await,
        Commands::Logout => cmd_logout(),
        Commands::Status { all } => cmd_status(all).await,
        Commands::Watch { interval } => cmd_watch(interval).await,
        Commands::Sessions { expand } => cmd_sessions(expand).await,
        Commands::Logs { limit, r#type } => cmd_logs(limit, r#type).await,
        Commands::Jobs { all } => cmd_jobs(all).await,
        Commands::Changelog { limit } => cmd_changelog(limit).await,
        Commands::Contributions => cmd_contributions().await,
        Commands::Refresh => cmd_refresh().await,
        Commands::Inbox { action } => cmd_inbox(action).await,
        Commands::Outbox { action } => cmd_outbox(action).await,
        Commands::Config => cmd_config(),
    }
}

/// Client with the stored token; an expired token means logging in again
fn client(config: &Config) -> Result<DeckClient> {
    if config.token.is_some() && config.active_token(Utc::now()).is_none() {
        bail!("Session expired. Run 'billdeck login' again.");
    }
    Ok(DeckClient::new(
        &config.base_url,
        config.active_token(Utc::now()),
    ))
}

fn fetch_status(stats: &StatsResponse) -> FetchStatus {
    FetchStatus {
        live: stats.live,
        last_fetch: stats.last_fetch,
        fetch_error: stats.fetch_error.clone(),
    }
}

/// Status line for `watch`: what the server knows about Bill, overridden
/// by a local error when the billdeck server itself did not answer
fn watch_status(server: Option<&FetchStatus>, store: &SnapshotStore) -> FetchStatus {
    let mut status = server.cloned().unwrap_or_default();
    if let Some(local) = store.fetch_error() {
        status.fetch_error = Some(format!("Billdeck server unreachable: {}", local));
    }
    status
}

async fn snapshot() -> Result<StatsSnapshot> {
    let config = Config::load()?;
    Ok(client(&config)?.stats().await?.snapshot)
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_login(password: Option<String>, url: Option<String>) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(url) = url {
        config.base_url = url.trim_end_matches('/').to_string();
    }

    let client = DeckClient::new(&config.base_url, None);
    print!("Testing connection... ");
    std::io::stdout().flush().ok();

    match client.health().await {
        Ok(true) => println!("{}", "OK".green()),
        _ => {
            println!("{}", "Failed".red());
            bail!("Could not reach Billdeck at {}", config.base_url);
        }
    }

    let password = match password {
        Some(p) => p,
        None => Password::new()
            .with_prompt("Password")
            .allow_empty_password(true)
            .interact()
            .context("Failed to read password")?,
    };

    let auth = client.login(&password).await?;
    config.set_token(auth.token, auth.expires_at);
    config.save()?;

    if !auth.auth_required {
        println!(
            "{}",
            "Warning: server has no password set, anyone can read it.".yellow()
        );
    }
    println!(
        "{} Logged in until {} (saved to {:?})",
        "✓".green(),
        auth.expires_at.format("%Y-%m-%d %H:%M UTC"),
        Config::config_path()?
    );

    Ok(())
}

fn cmd_logout() -> Result<()> {
    let mut config = Config::load()?;
    if config.clear_token() {
        config.save()?;
        println!("{} Logged out", "✓".green());
    } else {
        println!("Not logged in.");
    }
    Ok(())
}

async fn cmd_status(all: bool) -> Result<()> {
    let config = Config::load()?;
    let stats = client(&config)?.stats().await?;

    let mut expand = ExpandState::new();
    if all {
        expand.expand(FEED_WIDGET);
    }

    let now = Utc::now();
    let view = DashboardView::build(&stats.snapshot, now, &expand);
    render::print_dashboard(&view, &fetch_status(&stats), now);
    Ok(())
}

async fn cmd_watch(interval: Option<u64>) -> Result<()> {
    let config = Config::load()?;
    let client = client(&config)?;
    let period = Duration::from_secs(interval.unwrap_or(config.watch_interval_secs).max(1));

    let mut store = SnapshotStore::new();
    let mut server_status: Option<FetchStatus> = None;
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                println!();
                return Ok(());
            }
        }

        // One request at a time; the ticket still guards ordering
        let ticket = store.begin();
        let (result, status) = match client.stats().await {
            Ok(stats) => {
                let status = fetch_status(&stats);
                (Ok(stats.snapshot), Some(status))
            }
            Err(e) => (Err(e.to_string()), None),
        };
        if store.complete(ticket, result, Utc::now()) == Applied::Stale {
            continue;
        }
        if status.is_some() {
            server_status = status;
        }

        let now = Utc::now();
        print!("\x1B[2J\x1B[H");
        match store.snapshot() {
            Some(snapshot) => {
                let view = DashboardView::build(&snapshot, now, &ExpandState::new());
                let status = watch_status(server_status.as_ref(), &store);
                render::print_dashboard(&view, &status, now);
            }
            None => {
                println!(
                    "{} {}",
                    "⚠".red(),
                    store.fetch_error().unwrap_or("Waiting for data").red()
                );
            }
        }
        println!(
            "\n{}",
            format!("Refreshing every {}s · Ctrl-C to quit", period.as_secs()).dimmed()
        );
    }
}

async fn cmd_sessions(expand_all: bool) -> Result<()> {
    let snapshot = snapshot().await?;

    let mut expand = ExpandState::new();
    if expand_all {
        for session in snapshot.live_sessions() {
            expand.expand(&session_widget(&session.session_id));
        }
    }

    let view = DashboardView::build(&snapshot, Utc::now(), &expand);
    if view.sessions.is_empty() {
        println!("No live sessions.");
        return Ok(());
    }
    render::print_sessions(&view.sessions);
    Ok(())
}

async fn cmd_logs(limit: usize, log_type: Option<String>) -> Result<()> {
    let snapshot = snapshot().await?;

    let mut expand = ExpandState::new();
    expand.expand(FEED_WIDGET);
    let view = DashboardView::build(&snapshot, Utc::now(), &expand);

    let wanted = log_type.map(LogType::from);
    let rows: Vec<_> = view
        .feed
        .into_iter()
        .filter(|row| match &wanted {
            Some(wanted) => row.descriptor == wanted.descriptor(),
            None => true,
        })
        .take(limit)
        .collect();

    if rows.is_empty() {
        println!("No brain logs.");
        return Ok(());
    }
    render::print_log_rows(&rows);
    Ok(())
}

async fn cmd_jobs(all: bool) -> Result<()> {
    let snapshot = snapshot().await?;
    let mut expand = ExpandState::new();
    if all {
        expand.expand(JOB_HISTORY_WIDGET);
    }
    let view = DashboardView::build(&snapshot, Utc::now(), &expand);
    render::print_job_rows(&view.job_history, view.job_history_total);
    Ok(())
}

async fn cmd_changelog(limit: usize) -> Result<()> {
    let snapshot = snapshot().await?;
    let entries: Vec<_> = changelog(snapshot.commits()).into_iter().take(limit).collect();
    render::print_changelog(&entries);
    Ok(())
}

async fn cmd_contributions() -> Result<()> {
    let snapshot = snapshot().await?;
    let days = snapshot.contributions();
    render::print_contributions(
        &ContributionSummary::from_days(days),
        &ContributionGrid::build(days),
    );
    Ok(())
}

async fn cmd_refresh() -> Result<()> {
    let config = Config::load()?;
    let refreshed = client(&config)?.refresh().await?;

    let marker = match refreshed.outcome.as_str() {
        "snapshot" => "✓".green(),
        "stale" => "~".yellow(),
        _ => "✗".red(),
    };
    println!("{} Refresh: {}", marker, refreshed.outcome);
    render::print_fetch_status(&fetch_status(&refreshed.stats), Utc::now());
    Ok(())
}

async fn cmd_inbox(action: InboxAction) -> Result<()> {
    let config = Config::load()?;
    let client = client(&config)?;

    match action {
        InboxAction::Upload { path } => {
            let size = fs::metadata(&path)
                .with_context(|| format!("Failed to read file: {}", path.display()))?
                .len();
            if size > billdeck::MAX_UPLOAD_BYTES as u64 {
                bail!(
                    "File too large: {} (max {})",
                    billdeck::format::format_bytes(size),
                    billdeck::format::format_bytes(billdeck::MAX_UPLOAD_BYTES as u64)
                );
            }

            let stored = client.upload_inbox(&path).await?;
            println!(
                "{} Uploaded {} as {} ({})",
                "✓".green(),
                stored.original_name,
                stored.file_name.cyan(),
                billdeck::format::format_bytes(stored.size)
            );
        }
    }

    Ok(())
}

async fn cmd_outbox(action: OutboxAction) -> Result<()> {
    let config = Config::load()?;
    let client = client(&config)?;

    match action {
        OutboxAction::List => {
            let files = client.list_outbox().await?;
            render::print_outbox(&files, Utc::now());
        }

        OutboxAction::Download { name, output } => {
            let bytes = client.download_outbox(&name).await?;
            let target = output.unwrap_or_else(|| PathBuf::from(&name));
            fs::write(&target, &bytes)
                .with_context(|| format!("Failed to write {}", target.display()))?;
            println!(
                "{} Saved {} ({})",
                "✓".green(),
                target.display(),
                billdeck::format::format_bytes(bytes.len() as u64)
            );
        }
    }

    Ok(())
}

fn cmd_config() -> Result<()> {
    let config = Config::load()?;

    println!("{}", "Configuration:".bold());
    println!("  Path: {:?}", Config::config_path()?);
    println!("  Server URL: {}", config.base_url);
    let session = match (config.token.is_some(), config.active_token(Utc::now())) {
        (_, Some(_)) => "Active".green(),
        (true, None) => "Expired".yellow(),
        (false, None) => "Not logged in".red(),
    };
    println!("  Session: {}", session);
    if let Some(expires_at) = config.token_expires_at {
        println!("  Expires: {}", expires_at.format("%Y-%m-%d %H:%M UTC"));
    }
    println!("  Watch interval: {}s", config.watch_interval_secs);

    Ok(())
}
