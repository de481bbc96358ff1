//! Git - Commit history and daily contribution counts of the agent's repo

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GitCommit {
    pub hash: String,
    #[serde(default)]
    pub short_hash: String,
    pub message: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub relative_date: String,
}

/// Commit count for one calendar day (`YYYY-MM-DD`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GitContribution {
    pub date: String,
    pub count: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GitInfo {
    #[serde(default)]
    pub commits: Vec<GitCommit>,
    #[serde(default)]
    pub contributions: Vec<GitContribution>,
}
