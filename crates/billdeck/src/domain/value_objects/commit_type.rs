//! CommitType - Conventional commit prefix

use serde::Serialize;

use super::descriptor::{Descriptor, Tone};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(into = "String")]
pub enum CommitType {
    Feat,
    Fix,
    Docs,
    Refactor,
    Chore,
    Style,
    Test,
    Perf,
    /// Message without a recognizable prefix
    Plain,
    Other(String),
}

impl CommitType {
    pub fn as_str(&self) -> &str {
        match self {
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Docs => "docs",
            CommitType::Refactor => "refactor",
            CommitType::Chore => "chore",
            CommitType::Style => "style",
            CommitType::Test => "test",
            CommitType::Perf => "perf",
            CommitType::Plain => "commit",
            CommitType::Other(tag) => tag,
        }
    }

    pub fn descriptor(&self) -> Descriptor {
        let label = self.as_str().to_uppercase();
        let tone = match self {
            CommitType::Feat => Tone::Green,
            CommitType::Fix => Tone::Red,
            CommitType::Docs => Tone::Blue,
            CommitType::Refactor => Tone::Purple,
            CommitType::Chore => Tone::Muted,
            CommitType::Style => Tone::Pink,
            CommitType::Test => Tone::Amber,
            CommitType::Perf => Tone::Cyan,
            CommitType::Plain | CommitType::Other(_) => Tone::Muted,
        };
        Descriptor::new("●", label, tone)
    }
}

impl From<&str> for CommitType {
    fn from(tag: &str) -> Self {
        match tag {
            "feat" => CommitType::Feat,
            "fix" => CommitType::Fix,
            "docs" => CommitType::Docs,
            "refactor" => CommitType::Refactor,
            "chore" => CommitType::Chore,
            "style" => CommitType::Style,
            "test" => CommitType::Test,
            "perf" => CommitType::Perf,
            "commit" => CommitType::Plain,
            other => CommitType::Other(other.to_string()),
        }
    }
}

impl From<CommitType> for String {
    fn from(commit_type: CommitType) -> Self {
        commit_type.as_str().to_string()
    }
}
