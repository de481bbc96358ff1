//! Git DTOs - Changelog and contribution grid

use serde::Serialize;
use utoipa::ToSchema;

use billdeck::{ChangelogEntry, ContributionGrid, ContributionSummary};

#[derive(Debug, Serialize, ToSchema)]
pub struct ChangelogResponse {
    #[schema(value_type = Vec<Object>)]
    pub entries: Vec<ChangelogEntry>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ContributionsResponse {
    #[schema(value_type = Object)]
    pub summary: ContributionSummary,
    #[schema(value_type = Object)]
    pub grid: ContributionGrid,
}
