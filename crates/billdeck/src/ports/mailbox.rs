//! Mailbox Store Port
//!
//! File exchange with the agent: humans drop files into the inbox, the
//! agent publishes files to the outbox.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Upload ceiling for inbox files (10 MiB)
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Result of storing an inbox upload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    pub file_name: String,
    pub size: u64,
    pub original_name: String,
}

/// One downloadable outbox entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutboxFile {
    pub name: String,
    pub url: String,
    pub size: u64,
    pub created: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[async_trait]
pub trait MailboxStore: Send + Sync {
    /// Store an upload under a collision-free, timestamp-prefixed name.
    /// Rejects bodies over [`MAX_UPLOAD_BYTES`] before touching disk.
    async fn save_inbox(&self, original_name: &str, bytes: &[u8]) -> Result<StoredFile, DomainError>;

    /// Outbox entries, newest first
    async fn list_outbox(&self) -> Result<Vec<OutboxFile>, DomainError>;

    /// Raw bytes of one outbox file
    async fn read_outbox(&self, name: &str) -> Result<Vec<u8>, DomainError>;

    /// Publish a file to the outbox, with an optional `.meta` description
    async fn add_outbox(
        &self,
        name: &str,
        bytes: &[u8],
        description: Option<&str>,
    ) -> Result<OutboxFile, DomainError>;
}

/// Best-effort MIME type from the file extension
pub fn content_type_for(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "json" => "application/json",
        "md" => "text/markdown",
        "csv" => "text/csv",
        _ => "application/octet-stream",
    }
}
