//! Filesystem Mailbox
//!
//! `MailboxStore` over two plain directories: `<data_dir>/inbox` for
//! uploads and `<data_dir>/outbox` for files the agent publishes. An outbox
//! file may carry a `<name>.meta` JSON sidecar with a description.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use billdeck::{DomainError, MailboxStore, OutboxFile, StoredFile, MAX_UPLOAD_BYTES};

const META_SUFFIX: &str = ".meta";
const MAX_NAME_CHARS: usize = 200;
const MAX_COLLISION_SUFFIX: u32 = 1000;

#[derive(Debug, Serialize, Deserialize)]
struct OutboxMeta {
    description: Option<String>,
}

pub struct FsMailbox {
    inbox_dir: PathBuf,
    outbox_dir: PathBuf,
}

impl FsMailbox {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            inbox_dir: data_dir.join("inbox"),
            outbox_dir: data_dir.join("outbox"),
        }
    }

    pub fn inbox_dir(&self) -> &Path {
        &self.inbox_dir
    }

    pub fn outbox_dir(&self) -> &Path {
        &self.outbox_dir
    }

    /// Store under `<timestamp_ms>_<base><ext>`, adding `-N` before the
    /// extension until `create_new` succeeds.
    async fn store_upload(
        &self,
        timestamp_ms: i64,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<StoredFile, DomainError> {
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(DomainError::PayloadTooLarge {
                size: bytes.len(),
                limit: MAX_UPLOAD_BYTES,
            });
        }

        fs::create_dir_all(&self.inbox_dir).await?;

        let clean = sanitize_filename(original_name);
        let (base, ext) = split_extension(&clean);

        for attempt in 0..MAX_COLLISION_SUFFIX {
            let file_name = if attempt == 0 {
                format!("{}_{}{}", timestamp_ms, base, ext)
            } else {
                format!("{}_{}-{}{}", timestamp_ms, base, attempt, ext)
            };
            let path = self.inbox_dir.join(&file_name);

            let mut file = match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            };

            file.write_all(bytes).await?;
            file.flush().await?;

            tracing::info!("📥 Inbox upload stored: {} ({} bytes)", file_name, bytes.len());

            return Ok(StoredFile {
                file_name,
                size: bytes.len() as u64,
                original_name: original_name.to_string(),
            });
        }

        Err(DomainError::Storage(format!(
            "No free file name for upload {}",
            original_name
        )))
    }

    async fn outbox_entry(&self, name: &str) -> Result<OutboxFile, DomainError> {
        let metadata = fs::metadata(self.outbox_dir.join(name)).await?;
        let created = metadata
            .created()
            .or_else(|_| metadata.modified())
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());

        Ok(OutboxFile {
            name: name.to_string(),
            url: download_url(name),
            size: metadata.len(),
            created,
            description: self.read_description(name).await,
        })
    }

    /// Description from the sidecar; unreadable or malformed sidecars are ignored
    async fn read_description(&self, name: &str) -> Option<String> {
        let raw = fs::read(self.outbox_dir.join(format!("{}{}", name, META_SUFFIX)))
            .await
            .ok()?;
        match serde_json::from_slice::<OutboxMeta>(&raw) {
            Ok(meta) => meta.description,
            Err(e) => {
                tracing::debug!("Ignoring malformed sidecar for {}: {}", name, e);
                None
            }
        }
    }
}

#[async_trait]
impl MailboxStore for FsMailbox {
    async fn save_inbox(&self, original_name: &str, bytes: &[u8]) -> Result<StoredFile, DomainError> {
        self.store_upload(Utc::now().timestamp_millis(), original_name, bytes)
            .await
    }

    async fn list_outbox(&self) -> Result<Vec<OutboxFile>, DomainError> {
        let mut dir = match fs::read_dir(&self.outbox_dir).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();
        while let Some(entry) = dir.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') || name.ends_with(META_SUFFIX) {
                continue;
            }
            if !entry.file_type().await?.is_file() {
                continue;
            }
            files.push(self.outbox_entry(&name).await?);
        }

        files.sort_by(|a, b| b.created.cmp(&a.created).then_with(|| a.name.cmp(&b.name)));
        Ok(files)
    }

    async fn read_outbox(&self, name: &str) -> Result<Vec<u8>, DomainError> {
        validate_outbox_name(name)?;

        match fs::read(self.outbox_dir.join(name)).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(DomainError::not_found("Outbox file", name))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn add_outbox(
        &self,
        name: &str,
        bytes: &[u8],
        description: Option<&str>,
    ) -> Result<OutboxFile, DomainError> {
        validate_outbox_name(name)?;
        if name.ends_with(META_SUFFIX) {
            return Err(DomainError::Validation(format!(
                "{} files are reserved for descriptions",
                META_SUFFIX
            )));
        }

        fs::create_dir_all(&self.outbox_dir).await?;
        fs::write(self.outbox_dir.join(name), bytes).await?;

        if let Some(description) = description.filter(|d| !d.trim().is_empty()) {
            let meta = serde_json::to_vec(&OutboxMeta {
                description: Some(description.to_string()),
            })
            .map_err(|e| DomainError::Storage(e.to_string()))?;
            fs::write(
                self.outbox_dir.join(format!("{}{}", name, META_SUFFIX)),
                meta,
            )
            .await?;
        }

        tracing::info!("📤 Outbox file added: {} ({} bytes)", name, bytes.len());

        self.outbox_entry(name).await
    }
}

pub fn download_url(name: &str) -> String {
    format!("/api/outbox/download/{}", urlencoding::encode(name))
}

/// Reduce an uploaded name to one safe path component
fn sanitize_filename(name: &str) -> String {
    let last = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = last
        .replace("..", "_")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| !c.is_control())
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    let truncated: String = cleaned.chars().take(MAX_NAME_CHARS).collect();

    if truncated.is_empty() {
        "upload".to_string()
    } else {
        truncated
    }
}

/// `report.final.pdf` -> (`report.final`, `.pdf`)
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name.split_at(idx),
        _ => (name, ""),
    }
}

fn validate_outbox_name(name: &str) -> Result<(), DomainError> {
    if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") || name.starts_with('.')
    {
        return Err(DomainError::Validation(format!(
            "Invalid outbox file name: {}",
            name
        )));
    }
    Ok(())
}
