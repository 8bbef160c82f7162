// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Working tree status types
//!
//! A [`Status`] maps each changed path to a [`FileStatus`] holding the two
//! short-format status codes (index and working tree) and, for renames and
//! copies, the path the content came from.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// One column of a short-format status line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "char", into = "char")]
pub enum StatusCode {
    /// `' '`
    Unmodified,
    /// `M`
    Modified,
    /// `A`
    Added,
    /// `D`
    Deleted,
    /// `R`
    Renamed,
    /// `C`
    Copied,
    /// `U`
    UpdatedButUnmerged,
    /// `?`
    Untracked,
    /// Any code outside the set above, kept verbatim (e.g. `T` or `!`)
    Other(char),
}

impl StatusCode {
    /// The single character git prints for this code
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::Unmodified => ' ',
            Self::Modified => 'M',
            Self::Added => 'A',
            Self::Deleted => 'D',
            Self::Renamed => 'R',
            Self::Copied => 'C',
            Self::UpdatedButUnmerged => 'U',
            Self::Untracked => '?',
            Self::Other(c) => c,
        }
    }

    /// Whether an entry with this code carries an origin path
    #[must_use]
    pub fn has_origin(self) -> bool {
        matches!(self, Self::Renamed | Self::Copied)
    }
}

impl From<char> for StatusCode {
    fn from(c: char) -> Self {
        match c {
            ' ' => Self::Unmodified,
            'M' => Self::Modified,
            'A' => Self::Added,
            'D' => Self::Deleted,
            'R' => Self::Renamed,
            'C' => Self::Copied,
            'U' => Self::UpdatedButUnmerged,
            '?' => Self::Untracked,
            other => Self::Other(other),
        }
    }
}

impl From<StatusCode> for char {
    fn from(code: StatusCode) -> Self {
        code.as_char()
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Status of a single path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStatus {
    /// Status in the index
    pub staging: StatusCode,
    /// Status in the working tree
    pub worktree: StatusCode,
    /// Origin path for renamed or copied entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<String>,
}

impl FileStatus {
    /// Create a status with no origin path
    #[must_use]
    pub fn new(staging: StatusCode, worktree: StatusCode) -> Self {
        Self {
            staging,
            worktree,
            extra: None,
        }
    }

    /// Attach an origin path
    #[must_use]
    pub fn with_extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = Some(extra.into());
        self
    }

    /// Whether either column reports a rename or copy
    #[must_use]
    pub fn is_rename_or_copy(&self) -> bool {
        self.staging.has_origin() || self.worktree.has_origin()
    }

    /// Whether the path is untracked
    #[must_use]
    pub fn is_untracked(&self) -> bool {
        self.staging == StatusCode::Untracked && self.worktree == StatusCode::Untracked
    }
}

/// Status of a working tree, keyed by path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Status {
    files: HashMap<String, FileStatus>,
}

impl Status {
    /// Create an empty status
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no path has changes
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.files.is_empty()
    }

    /// Look up a path exactly as reported
    #[must_use]
    pub fn file(&self, path: &str) -> Option<&FileStatus> {
        self.files.get(path)
    }

    /// Record the status of a path, replacing any previous entry for it
    pub fn insert(&mut self, path: impl Into<String>, status: FileStatus) {
        self.files.insert(path.into(), status);
    }

    /// Number of changed paths
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// True when no path has changes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate over `(path, status)` pairs in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FileStatus)> {
        self.files.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Changed paths, sorted
    #[must_use]
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.files.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }
}

/// Short-format rendering, one `XY path` line per entry in path order
impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for path in self.paths() {
            let file = &self.files[path];
            match &file.extra {
                Some(origin) => {
                    writeln!(f, "{}{} {} -> {}", file.staging, file.worktree, origin, path)?
                }
                None => writeln!(f, "{}{} {}", file.staging, file.worktree, path)?,
            }
        }
        Ok(())
    }
}

impl FromIterator<(String, FileStatus)> for Status {
    fn from_iter<I: IntoIterator<Item = (String, FileStatus)>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

/// Decode a path as git reports it, keeping bytes that are not UTF-8
///
/// Valid UTF-8 is kept verbatim. Each invalid byte becomes a `\ooo` octal
/// escape, as `core.quotePath` writes it, so distinct byte strings stay
/// distinct keys.
#[must_use]
pub fn path_from_bytes(bytes: &[u8]) -> String {
    let mut path = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        path.push_str(chunk.valid());
        for byte in chunk.invalid() {
            path.push_str(&format!("\\{byte:03o}"));
        }
    }
    path
}
