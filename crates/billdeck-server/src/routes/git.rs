//! Git Routes - Changelog and contribution grid from the snapshot's git block

use axum::{extract::State, routing::get, Json, Router};

use billdeck::{ContributionGrid, ContributionSummary};

use crate::models::{ChangelogResponse, ContributionsResponse};
use crate::AppState;

/// Commits classified by conventional-commit type
#[utoipa::path(
    get,
    path = "/api/changelog",
    responses(
        (status = 200, description = "Changelog entries, newest first", body = ChangelogResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Git"
)]
pub async fn get_changelog(State(state): State<AppState>) -> Json<ChangelogResponse> {
    let polled = state.poller.current().await;
    Json(ChangelogResponse {
        entries: billdeck::domain::changelog(polled.snapshot.commits()),
    })
}

/// Daily commit counts as a week-column grid
#[utoipa::path(
    get,
    path = "/api/contributions",
    responses(
        (status = 200, description = "Contribution summary and grid", body = ContributionsResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Git"
)]
pub async fn get_contributions(State(state): State<AppState>) -> Json<ContributionsResponse> {
    let polled = state.poller.current().await;
    let days = polled.snapshot.contributions();
    Json(ContributionsResponse {
        summary: ContributionSummary::from_days(days),
        grid: ContributionGrid::build(days),
    })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/changelog", get(get_changelog))
        .route("/api/contributions", get(get_contributions))
}
