//! HTTP Stats Source
//!
//! Fetches snapshots from the agent's stats API using reqwest.

use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client};
use std::time::Duration;

use billdeck::{DomainError, StatsSnapshot, StatsSource};

/// `GET <upstream>/api/stats`
pub struct HttpStatsSource {
    client: Client,
    url: String,
}

impl HttpStatsSource {
    pub fn new(upstream_url: &str, timeout: Duration) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("billdeck/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DomainError::ExternalService(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: format!("{}/api/stats", upstream_url.trim_end_matches('/')),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl StatsSource for HttpStatsSource {
    async fn fetch(&self) -> Result<StatsSnapshot, DomainError> {
        let response = self
            .client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DomainError::ExternalService("Stats request timed out".to_string())
                } else {
                    DomainError::ExternalService(format!("Could not connect to Bill: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::ExternalService(format!(
                "Stats API returned {}",
                status
            )));
        }

        response
            .json::<StatsSnapshot>()
            .await
            .map_err(|e| DomainError::ExternalService(format!("Malformed stats payload: {e}")))
    }
}
