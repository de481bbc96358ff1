//! Mailbox Application Service (Use Case)
//!
//! Orchestrates inbox uploads and outbox publishing over a `MailboxStore`.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use billdeck::ports::content_type_for;
use billdeck::{DomainError, MailboxStore, OutboxFile, StoredFile};

/// A file ready to be streamed back to the client
pub struct Download {
    pub name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Application service for mailbox operations
pub struct MailboxService<M: MailboxStore> {
    store: Arc<M>,
}

impl<M: MailboxStore> MailboxService<M> {
    pub fn new(store: Arc<M>) -> Self {
        Self { store }
    }

    pub async fn upload(&self, original_name: &str, bytes: &[u8]) -> Result<StoredFile, DomainError> {
        if original_name.trim().is_empty() {
            return Err(DomainError::Validation("No file provided".to_string()));
        }
        self.store.save_inbox(original_name, bytes).await
    }

    pub async fn list(&self) -> Result<Vec<OutboxFile>, DomainError> {
        self.store.list_outbox().await
    }

    pub async fn download(&self, name: &str) -> Result<Download, DomainError> {
        let bytes = self.store.read_outbox(name).await?;
        Ok(Download {
            name: name.to_string(),
            content_type: content_type_for(name),
            bytes,
        })
    }

    /// Publish agent output. `content` is base64 when it decodes cleanly,
    /// plain UTF-8 text otherwise.
    pub async fn publish(
        &self,
        name: &str,
        content: &str,
        description: Option<&str>,
    ) -> Result<OutboxFile, DomainError> {
        if name.trim().is_empty() || content.is_empty() {
            return Err(DomainError::Validation(
                "fileName and content required".to_string(),
            ));
        }

        let bytes = decode_content(content);
        self.store.add_outbox(name, &bytes, description).await
    }
}

fn decode_content(content: &str) -> Vec<u8> {
    BASE64
        .decode(content.trim())
        .unwrap_or_else(|_| content.as_bytes().to_vec())
}
