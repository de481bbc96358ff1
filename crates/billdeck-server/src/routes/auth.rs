//! Auth Routes - Password login and session info

use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::Utc;

use crate::auth::SessionContext;
use crate::models::{AuthRequest, AuthResponse, SessionResponse};
use crate::routes::domain_error;
use crate::AppState;

/// Trade the dashboard password for a session token
#[utoipa::path(
    post,
    path = "/api/auth",
    request_body = AuthRequest,
    responses(
        (status = 200, description = "Session token issued", body = AuthResponse),
        (status = 401, description = "Invalid password")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<AuthRequest>,
) -> Result<Json<AuthResponse>, (axum::http::StatusCode, String)> {
    let issued = state
        .auth
        .login(&payload.password, Utc::now())
        .map_err(|e| {
            tracing::warn!("🔒 Rejected login attempt");
            domain_error(e)
        })?;

    Ok(Json(AuthResponse {
        success: true,
        token: issued.token,
        expires_at: issued.expires_at,
        auth_required: state.auth.enabled(),
    }))
}

/// Current session
#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "Session is valid", body = SessionResponse),
        (status = 401, description = "Missing, invalid or expired token")
    ),
    tag = "Auth"
)]
pub async fn get_session(Extension(session): Extension<SessionContext>) -> Json<SessionResponse> {
    Json(SessionResponse {
        authenticated: session.is_authenticated(),
        expires_at: session.expires_at,
    })
}

/// Public: login only
pub fn router() -> Router<AppState> {
    Router::new().route("/api/auth", post(login))
}

/// Behind the auth middleware
pub fn protected_router() -> Router<AppState> {
    Router::new().route("/api/auth/session", get(get_session))
}
