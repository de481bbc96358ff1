//! JobType / JobStatus - Scheduled background job tags

use serde::{Deserialize, Serialize};

use super::descriptor::{Descriptor, Tone};

/// Kind of scheduled job run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum JobType {
    Linear,
    Upgrade,
    Orchestrate,
    Wrap,
    Other(String),
}

impl JobType {
    pub fn as_str(&self) -> &str {
        match self {
            JobType::Linear => "linear",
            JobType::Upgrade => "upgrade",
            JobType::Orchestrate => "orchestrate",
            JobType::Wrap => "wrap",
            JobType::Other(tag) => tag,
        }
    }

    pub fn descriptor(&self) -> Descriptor {
        match self {
            JobType::Linear => Descriptor::new("🔧", "Linear", Tone::Blue),
            JobType::Upgrade => Descriptor::new("🧠", "Upgrade", Tone::Purple),
            JobType::Orchestrate => Descriptor::new("🎯", "Orchestrate", Tone::Accent),
            JobType::Wrap => Descriptor::new("🌙", "Wrap", Tone::Indigo),
            JobType::Other(tag) => Descriptor::new("?", tag.clone(), Tone::Muted),
        }
    }
}

impl From<String> for JobType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "linear" => JobType::Linear,
            "upgrade" => JobType::Upgrade,
            "orchestrate" => JobType::Orchestrate,
            "wrap" => JobType::Wrap,
            _ => JobType::Other(tag),
        }
    }
}

impl From<JobType> for String {
    fn from(job_type: JobType) -> Self {
        match job_type {
            JobType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

/// Outcome of a job run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    Completed,
    Skipped,
    Error,
    Other(String),
}

impl JobStatus {
    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Completed => "completed",
            JobStatus::Skipped => "skipped",
            JobStatus::Error => "error",
            JobStatus::Other(tag) => tag,
        }
    }

    /// Short badge shown next to the job label
    pub fn descriptor(&self) -> Descriptor {
        match self {
            JobStatus::Completed => Descriptor::new("✓", "Done", Tone::Green),
            JobStatus::Skipped => Descriptor::new("-", "Skip", Tone::Muted),
            JobStatus::Error => Descriptor::new("✗", "Error", Tone::Red),
            JobStatus::Other(tag) => Descriptor::new("?", tag.clone(), Tone::Muted),
        }
    }
}

impl From<String> for JobStatus {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "completed" => JobStatus::Completed,
            "skipped" => JobStatus::Skipped,
            "error" => JobStatus::Error,
            _ => JobStatus::Other(tag),
        }
    }
}

impl From<JobStatus> for String {
    fn from(status: JobStatus) -> Self {
        match status {
            JobStatus::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}
