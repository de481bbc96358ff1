//! Dashboard Routes - Everything the dashboard draws, at a glance

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;

use billdeck::render::DashboardView;

use crate::models::{DashboardQuery, DashboardResponse};
use crate::AppState;

/// Derived dashboard widgets for the current snapshot
#[utoipa::path(
    get,
    path = "/api/dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Dashboard widgets", body = DashboardResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Dashboard"
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Json<DashboardResponse> {
    let polled = state.poller.current().await;
    let now = Utc::now();

    Json(DashboardResponse {
        view: DashboardView::build(&polled.snapshot, now, &query.expand_state()),
        live: polled.live,
        last_fetch: polled.last_fetch,
        fetch_error: polled.fetch_error,
        generated_at: now,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/dashboard", get(get_dashboard))
}
