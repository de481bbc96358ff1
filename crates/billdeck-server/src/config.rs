//! Server configuration
//!
//! Read once at startup from the process environment (`.env` is loaded by
//! `main` through dotenvy).

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_UPSTREAM_URL: &str = "http://localhost:3001";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_SESSION_TTL_SECS: u64 = 12 * 60 * 60;
pub const DEFAULT_BIRTHDAY: &str = "January 2, 2026";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_addr: SocketAddr,
    pub upstream_url: String,
    pub poll_interval: Duration,
    pub fetch_timeout: Duration,
    pub data_dir: PathBuf,
    /// `None` disables authentication
    pub password: Option<String>,
    /// HMAC key for session tokens; random per process when unset
    pub session_secret: Option<String>,
    pub session_ttl: Duration,
    pub birthday: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            listen_addr: parse_or(
                "BILLDECK_LISTEN_ADDR",
                get("BILLDECK_LISTEN_ADDR"),
                DEFAULT_LISTEN_ADDR,
            )?,
            upstream_url: get("BILLDECK_UPSTREAM_URL")
                .unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            poll_interval: Duration::from_secs(positive_secs(
                "BILLDECK_POLL_INTERVAL_SECS",
                get("BILLDECK_POLL_INTERVAL_SECS"),
                DEFAULT_POLL_INTERVAL_SECS,
            )?),
            fetch_timeout: Duration::from_secs(positive_secs(
                "BILLDECK_FETCH_TIMEOUT_SECS",
                get("BILLDECK_FETCH_TIMEOUT_SECS"),
                DEFAULT_FETCH_TIMEOUT_SECS,
            )?),
            data_dir: get("BILLDECK_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            password: get("BILLDECK_PASSWORD"),
            session_secret: get("BILLDECK_SESSION_SECRET"),
            session_ttl: Duration::from_secs(positive_secs(
                "BILLDECK_SESSION_TTL_SECS",
                get("BILLDECK_SESSION_TTL_SECS"),
                DEFAULT_SESSION_TTL_SECS,
            )?),
            birthday: get("BILLDECK_BIRTHDAY").unwrap_or_else(|| DEFAULT_BIRTHDAY.to_string()),
        })
    }
}

fn parse_or<T: FromStr>(
    key: &'static str,
    value: Option<String>,
    default: &str,
) -> Result<T, ConfigError> {
    let raw = value.unwrap_or_else(|| default.to_string());
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value: raw })
}

fn positive_secs(key: &'static str, value: Option<String>, default: u64) -> Result<u64, ConfigError> {
    let secs: u64 = parse_or(key, value, &default.to_string())?;
    if secs == 0 {
        return Err(ConfigError::Invalid {
            key,
            value: "0".to_string(),
        });
    }
    Ok(secs)
}
