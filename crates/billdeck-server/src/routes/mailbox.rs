//! Mailbox Routes - File exchange with the agent
//!
//! Humans upload to the inbox; the agent publishes to the outbox and humans
//! download from it.

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use billdeck::MAX_UPLOAD_BYTES;

use crate::models::{
    AddOutboxRequest, AddOutboxResponse, OutboxListResponse, UploadForm, UploadResponse,
};
use crate::routes::domain_error;
use crate::AppState;

/// Request body ceiling: room for multipart framing and base64 inflation on
/// top of the file limit itself, which the store enforces exactly
pub const BODY_LIMIT_BYTES: usize = MAX_UPLOAD_BYTES * 2;

/// Upload a file to the inbox
#[utoipa::path(
    post,
    path = "/api/inbox",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File stored", body = UploadResponse),
        (status = 400, description = "No file provided"),
        (status = 413, description = "File larger than 10 MiB"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Mailbox"
)]
pub async fn upload_inbox(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, (StatusCode, String)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (e.status(), e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let original_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| (e.status(), e.body_text()))?;

        let stored = state
            .mailbox
            .upload(&original_name, &bytes)
            .await
            .map_err(domain_error)?;

        return Ok(Json(UploadResponse {
            message: "File uploaded successfully".to_string(),
            file_name: stored.file_name,
            size: stored.size,
            original_name: stored.original_name,
        }));
    }

    Err((StatusCode::BAD_REQUEST, "No file provided".to_string()))
}

/// List outbox files, newest first
#[utoipa::path(
    get,
    path = "/api/outbox",
    responses(
        (status = 200, description = "Outbox files", body = OutboxListResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Mailbox"
)]
pub async fn list_outbox(
    State(state): State<AppState>,
) -> Result<Json<OutboxListResponse>, (StatusCode, String)> {
    let files = state.mailbox.list().await.map_err(domain_error)?;
    Ok(Json(OutboxListResponse { files }))
}

/// Publish a file to the outbox (agent side)
#[utoipa::path(
    post,
    path = "/api/outbox",
    request_body = AddOutboxRequest,
    responses(
        (status = 200, description = "File added", body = AddOutboxResponse),
        (status = 400, description = "Invalid file name or empty content"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Mailbox"
)]
pub async fn add_outbox(
    State(state): State<AppState>,
    Json(payload): Json<AddOutboxRequest>,
) -> Result<Json<AddOutboxResponse>, (StatusCode, String)> {
    let file = state
        .mailbox
        .publish(
            &payload.file_name,
            &payload.content,
            payload.description.as_deref(),
        )
        .await
        .map_err(domain_error)?;

    Ok(Json(AddOutboxResponse {
        message: "File added to outbox successfully".to_string(),
        file_name: file.name,
        size: file.size,
    }))
}

/// Download one outbox file as an attachment
#[utoipa::path(
    get,
    path = "/api/outbox/download/{filename}",
    params(
        ("filename" = String, Path, description = "Outbox file name")
    ),
    responses(
        (status = 200, description = "File contents"),
        (status = 400, description = "Invalid file name"),
        (status = 404, description = "File not found")
    ),
    tag = "Mailbox"
)]
pub async fn download_outbox(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, (StatusCode, String)> {
    let download = state.mailbox.download(&filename).await.map_err(domain_error)?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        download.name.replace(['"', '\r', '\n'], "_")
    );

    Ok((
        [
            (header::CONTENT_TYPE, download.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        download.bytes,
    )
        .into_response())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/inbox", post(upload_inbox))
        .route("/api/outbox", get(list_outbox).post(add_outbox))
        .route("/api/outbox/download/:filename", get(download_outbox))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
}
