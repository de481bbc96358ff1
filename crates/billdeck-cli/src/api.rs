//! Billdeck API Client

use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use reqwest::{multipart, Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use billdeck::{OutboxFile, StatsSnapshot};

/// API Client for a Billdeck server
pub struct DeckClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

// ============================================
// API Response Types
// ============================================

#[derive(Debug, Serialize)]
struct AuthRequest<'a> {
    password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub auth_required: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub snapshot: StatsSnapshot,
    pub live: bool,
    pub last_fetch: Option<DateTime<Utc>>,
    pub fetch_error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RefreshResponse {
    pub outcome: String,
    pub stats: StatsResponse,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub file_name: String,
    pub size: u64,
    pub original_name: String,
}

#[derive(Debug, Deserialize)]
struct OutboxListResponse {
    files: Vec<OutboxFile>,
}

impl DeckClient {
    /// Create a new API client
    pub fn new(base_url: &str, token: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(str::to_string),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    /// Send, fail on non-success status, decode the JSON body
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let resp = self
            .authorized(request)
            .send()
            .await
            .context("Failed to connect to Billdeck API")?;

        let resp = check_status(resp).await?;
        resp.json().await.context("Failed to parse response")
    }

    /// Test connection with health check
    pub async fn health(&self) -> Result<bool> {
        let resp = self.client.get(self.url("/health")).send().await?;
        Ok(resp.status().is_success())
    }

    /// Trade the password for a session token
    pub async fn login(&self, password: &str) -> Result<AuthResponse> {
        let resp = self
            .client
            .post(self.url("/api/auth"))
            .json(&AuthRequest { password })
            .send()
            .await
            .context("Failed to connect to Billdeck API")?;

        if resp.status() == StatusCode::UNAUTHORIZED {
            bail!("Invalid password");
        }
        let resp = check_status(resp).await?;
        resp.json().await.context("Failed to parse response")
    }

    /// Latest polled snapshot
    pub async fn stats(&self) -> Result<StatsResponse> {
        self.send(self.client.get(self.url("/api/stats"))).await
    }

    /// Ask the server to poll now
    pub async fn refresh(&self) -> Result<RefreshResponse> {
        self.send(self.client.post(self.url("/api/stats/refresh")))
            .await
    }

    /// Upload a local file to the inbox
    pub async fn upload_inbox(&self, path: &Path) -> Result<UploadResponse> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .context("Path has no file name")?;

        let form = multipart::Form::new().part(
            "file",
            multipart::Part::bytes(bytes).file_name(file_name),
        );

        self.send(self.client.post(self.url("/api/inbox")).multipart(form))
            .await
    }

    pub async fn list_outbox(&self) -> Result<Vec<OutboxFile>> {
        let list: OutboxListResponse = self
            .send(self.client.get(self.url("/api/outbox")))
            .await?;
        Ok(list.files)
    }

    pub async fn download_outbox(&self, name: &str) -> Result<Vec<u8>> {
        let url = self.url(&format!(
            "/api/outbox/download/{}",
            urlencoding::encode(name)
        ));
        let resp = self
            .authorized(self.client.get(url))
            .send()
            .await
            .context("Failed to connect to Billdeck API")?;

        let resp = check_status(resp).await?;
        let bytes = resp.bytes().await.context("Failed to read download")?;
        Ok(bytes.to_vec())
    }
}

async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    if status == StatusCode::UNAUTHORIZED {
        bail!("Not authorized ({}). Run 'billdeck login' again.", body);
    }
    bail!("API error ({}): {}", status, body);
}
