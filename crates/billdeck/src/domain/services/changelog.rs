//! Changelog - Conventional commit classification

use serde::Serialize;

use crate::domain::entities::GitCommit;
use crate::domain::value_objects::CommitType;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChangelogEntry {
    pub commit_type: CommitType,
    /// Message with the `type(scope):` prefix stripped
    pub subject: String,
    pub short_hash: String,
    pub author: String,
    pub relative_date: String,
}

impl ChangelogEntry {
    pub fn from_commit(commit: &GitCommit) -> Self {
        let (commit_type, subject) = parse_conventional(&commit.message);
        let short_hash = if commit.short_hash.is_empty() {
            commit.hash.chars().take(7).collect()
        } else {
            commit.short_hash.clone()
        };

        Self {
            commit_type,
            subject,
            short_hash,
            author: commit.author.clone(),
            relative_date: commit.relative_date.clone(),
        }
    }
}

/// Split `type(scope): subject` into its type and subject.
///
/// Messages that do not follow the convention come back as
/// `CommitType::Plain` with the message untouched.
pub fn parse_conventional(message: &str) -> (CommitType, String) {
    let plain = || (CommitType::Plain, message.to_string());

    let type_end = message
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(message.len());
    if type_end == 0 {
        return plain();
    }

    let mut rest = &message[type_end..];
    if let Some(scoped) = rest.strip_prefix('(') {
        match scoped.find(')') {
            Some(close) if close > 0 => rest = &scoped[close + 1..],
            _ => return plain(),
        }
    }

    let Some(subject) = rest.strip_prefix(':') else {
        return plain();
    };
    let subject = subject.trim_start();
    if subject.is_empty() {
        return plain();
    }

    (CommitType::from(&message[..type_end]), subject.to_string())
}

pub fn changelog(commits: &[GitCommit]) -> Vec<ChangelogEntry> {
    commits.iter().map(ChangelogEntry::from_commit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_scope() {
        let (commit_type, subject) = parse_conventional("feat(dashboard): live sessions");
        assert_eq!(commit_type, CommitType::Feat);
        assert_eq!(subject, "live sessions");
    }

    #[test]
    fn test_parse_without_scope() {
        let (commit_type, subject) = parse_conventional("fix: stale banner");
        assert_eq!(commit_type, CommitType::Fix);
        assert_eq!(subject, "stale banner");
    }

    #[test]
    fn test_unknown_type_is_kept() {
        let (commit_type, _) = parse_conventional("build: bump deps");
        assert_eq!(commit_type, CommitType::Other("build".to_string()));
    }

    #[test]
    fn test_plain_messages() {
        for message in ["Initial commit", "Merge branch 'main'", "wip(: nope", ": empty"] {
            let (commit_type, subject) = parse_conventional(message);
            assert_eq!(commit_type, CommitType::Plain, "{message}");
            assert_eq!(subject, message);
        }
    }

    #[test]
    fn test_short_hash_fallback() {
        let commit = GitCommit {
            hash: "0123456789abcdef".to_string(),
            short_hash: String::new(),
            message: "docs: readme".to_string(),
            author: "bill".to_string(),
            date: String::new(),
            relative_date: "2 hours ago".to_string(),
        };
        let entry = ChangelogEntry::from_commit(&commit);
        assert_eq!(entry.short_hash, "0123456");
        assert_eq!(entry.commit_type, CommitType::Docs);
    }
}
