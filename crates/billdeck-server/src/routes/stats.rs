//! Stats Routes - Polled snapshot
//!
//! The poller is the only writer; these handlers read one pinned snapshot.

use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};

use billdeck::Applied;

use crate::auth::SessionContext;
use crate::models::{RefreshResponse, StatsResponse};
use crate::AppState;

/// Latest snapshot, or the offline fallback before the first success
#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Latest snapshot", body = StatsResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Stats"
)]
pub async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.poller.current().await.into())
}

/// Fetch now instead of waiting for the next tick
#[utoipa::path(
    post,
    path = "/api/stats/refresh",
    responses(
        (status = 200, description = "Refresh finished", body = RefreshResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Stats"
)]
pub async fn refresh_stats(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> Json<RefreshResponse> {
    tracing::info!(
        session = session.session_id.as_deref().unwrap_or("open"),
        "🔄 Manual stats refresh"
    );

    let outcome = match state.poller.refresh_now().await {
        Applied::Snapshot => "snapshot",
        Applied::Error => "error",
        Applied::Stale => "stale",
    };

    Json(RefreshResponse {
        outcome: outcome.to_string(),
        stats: state.poller.current().await.into(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/stats", get(get_stats))
        .route("/api/stats/refresh", post(refresh_stats))
}
