//! Auth DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Login request
#[derive(Debug, Deserialize, ToSchema)]
pub struct AuthRequest {
    pub password: String,
}

/// Issued session token
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    /// False when the server runs without a password
    pub auth_required: bool,
}

/// The caller's session, as seen by the auth middleware
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub authenticated: bool,
    pub expires_at: Option<DateTime<Utc>>,
}
