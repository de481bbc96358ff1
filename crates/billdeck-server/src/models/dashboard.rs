//! Dashboard DTOs - Derived widgets for one snapshot

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use billdeck::render::{DashboardView, ExpandState};

/// Expanded widgets, comma separated (`feed`, `job_history`, `session:<id>`)
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DashboardQuery {
    pub expand: Option<String>,
}

impl DashboardQuery {
    pub fn expand_state(&self) -> ExpandState {
        let mut state = ExpandState::new();
        for key in self
            .expand
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
        {
            state.expand(key);
        }
        state
    }
}

/// Dashboard response - every widget derived from one snapshot
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    #[schema(value_type = Object)]
    pub view: DashboardView,
    pub live: bool,
    pub last_fetch: Option<DateTime<Utc>>,
    pub fetch_error: Option<String>,
    pub generated_at: DateTime<Utc>,
}
