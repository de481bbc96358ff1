//! JobLog - Record of a scheduled background task run

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{JobStatus, JobType};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobLog {
    pub id: i64,
    pub job_type: JobType,
    #[serde(default)]
    pub content: String,
    pub status: JobStatus,
    /// Epoch milliseconds
    pub timestamp: i64,
}
