//! Configuration management for Billdeck CLI
//!
//! Stores the server URL and session token in ~/.config/billdeck/config.toml

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const CONFIG_DIR: &str = "billdeck";
const CONFIG_FILE: &str = "config.toml";

/// CLI Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_expires_at: Option<DateTime<Utc>>,
    /// Refresh period for `billdeck watch`
    #[serde(default = "default_watch_interval")]
    pub watch_interval_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_watch_interval() -> u64 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            token_expires_at: None,
            watch_interval_secs: default_watch_interval(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        Self::parse(&content)
    }

    fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory {:?}", dir))?;

        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    pub fn set_token(&mut self, token: String, expires_at: DateTime<Utc>) {
        self.token = Some(token);
        self.token_expires_at = Some(expires_at);
    }

    pub fn clear_token(&mut self) -> bool {
        self.token_expires_at = None;
        self.token.take().is_some()
    }

    /// Token still usable at `now`. A token without a recorded expiry is
    /// trusted until the server says otherwise.
    pub fn active_token(&self, now: DateTime<Utc>) -> Option<&str> {
        match self.token_expires_at {
            Some(expires_at) if expires_at <= now => None,
            _ => self.token.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = Config::parse("token = \"abc\"\n").unwrap();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.watch_interval_secs, 5);
        assert_eq!(config.token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_saved_token_survives_serialization() {
        let mut config = Config::default();
        let expires_at = DateTime::from_timestamp(1_767_700_000, 0).unwrap();
        config.set_token("1767700000.nonce.sig".to_string(), expires_at);

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = Config::parse(&text).unwrap();
        assert_eq!(parsed.token_expires_at, Some(expires_at));
    }

    #[test]
    fn test_expired_token_is_not_active() {
        let now = Utc::now();
        let mut config = Config::default();
        assert!(config.active_token(now).is_none());

        config.set_token("t".to_string(), now + Duration::hours(1));
        assert_eq!(config.active_token(now), Some("t"));
        assert!(config.active_token(now + Duration::hours(2)).is_none());

        assert!(config.clear_token());
        assert!(!config.clear_token());
    }
}
