//! Commit references produced by history traversal

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A commit visited while walking history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// The commit SHA (40 hex characters)
    pub sha: String,
    /// Commit message
    pub message: String,
    /// Author name
    pub author: String,
    /// Author email
    pub author_email: String,
    /// Commit timestamp
    pub timestamp: DateTime<Utc>,
    /// Parent commit SHAs
    pub parents: Vec<String>,
}

impl Commit {
    /// Build a commit reference from a libgit2 commit
    #[must_use]
    pub fn from_git2(git_commit: &git2::Commit<'_>) -> Self {
        let timestamp = Utc
            .timestamp_opt(git_commit.time().seconds(), 0)
            .single()
            .unwrap_or_default();

        Self {
            sha: git_commit.id().to_string(),
            message: git_commit.message().unwrap_or("").to_string(),
            author: git_commit.author().name().unwrap_or("Unknown").to_string(),
            author_email: git_commit.author().email().unwrap_or("").to_string(),
            timestamp,
            parents: git_commit.parent_ids().map(|id| id.to_string()).collect(),
        }
    }

    /// Get the short SHA (first 7 characters)
    #[must_use]
    pub fn short_sha(&self) -> &str {
        &self.sha[..7.min(self.sha.len())]
    }

    /// Check if this is a merge commit (has multiple parents)
    #[must_use]
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    /// Check if this is a root commit (has no parents)
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Get the first line of the commit message (subject)
    #[must_use]
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    fn sample_commit() -> Commit {
        Commit {
            sha: "1945ab9c752534e733c38ba0109dc3b741f0a6eb".to_string(),
            message: "bump version.txt to 0.2\n\nStarts the 0.2 series.".to_string(),
            author: "testfixture".to_string(),
            author_email: "testfixture@example.com".to_string(),
            timestamp: Utc.with_ymd_and_hms(2026, 1, 17, 2, 33, 6).unwrap(),
            parents: vec!["c460aeb7fb2d109c17e43de0ce681faec0b7374d".to_string()],
        }
    }

    #[test]
    fn test_short_sha() {
        assert_eq!(sample_commit().short_sha(), "1945ab9");
    }

    #[test]
    fn test_short_sha_handles_short_input() {
        let mut commit = sample_commit();
        commit.sha = "abc".to_string();
        assert_eq!(commit.short_sha(), "abc");
    }

    #[test]
    fn test_is_root() {
        let mut commit = sample_commit();
        assert!(!commit.is_root());
        commit.parents.clear();
        assert!(commit.is_root());
    }

    #[test]
    fn test_is_merge_with_multiple_parents() {
        let mut commit = sample_commit();
        commit.parents.push("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa".to_string());
        assert!(commit.is_merge());
    }

    #[test]
    fn test_is_merge_with_single_parent() {
        assert!(!sample_commit().is_merge());

        let mut root = sample_commit();
        root.parents.clear();
        assert!(!root.is_merge());
    }

    #[test]
    fn test_subject() {
        assert_eq!(sample_commit().subject(), "bump version.txt to 0.2");

        let mut commit = sample_commit();
        commit.message = String::new();
        assert_eq!(commit.subject(), "");
    }

    #[test]
    fn test_timestamp_serializes_as_rfc3339() {
        let json = serde_json::to_string(&sample_commit()).expect("serialize");
        assert!(json.contains("2026-01-17T02:33:06Z"));
    }
}
