//! Mailbox DTOs - Inbox uploads and outbox files

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use billdeck::OutboxFile;

/// Multipart upload body (documentation only)
#[derive(Debug, ToSchema)]
pub struct UploadForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: String,
    pub file_name: String,
    pub size: u64,
    pub original_name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OutboxListResponse {
    #[schema(value_type = Vec<Object>)]
    pub files: Vec<OutboxFile>,
}

/// Agent-side publish request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddOutboxRequest {
    pub file_name: String,
    /// Base64, or plain text when it is not valid base64
    pub content: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddOutboxResponse {
    pub message: String,
    pub file_name: String,
    pub size: u64,
}
