// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Version derivation from commit history
//!
//! A human-edited marker file (e.g. `version.txt` containing `0.1`) holds the
//! base version. Walking history from the tip, every consecutive commit that
//! still carries the same base adds one to a depth counter; the first commit
//! with a different base ends the walk. The result is `<base>.<depth>`, so the
//! last component grows with every commit and returns to 0 on the commit that
//! bumps the marker.
//!
//! History is read through [`HistoryAccessor`], which keeps the algorithm
//! independent of libgit2 and lets tests script commits in memory.

use crate::error::GitterError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::ControlFlow;
use std::str::FromStr;
use tracing::{debug, info};

/// Lazily produced commits, newest first
pub type CommitIter<'a, C> = Box<dyn Iterator<Item = Result<C, GitterError>> + 'a>;

/// Read access to commit history and file content at a commit
pub trait HistoryAccessor {
    /// Handle for one commit
    type Commit;

    /// Commits reachable from the tip, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if traversal cannot start (e.g. no `HEAD`).
    fn commit_history(&self) -> Result<CommitIter<'_, Self::Commit>, GitterError>;

    /// Content of `path` in the tree of `commit`, or `None` if it is absent
    ///
    /// # Errors
    ///
    /// Returns an error if the tree or blob cannot be read.
    fn file_content_at(
        &self,
        commit: &Self::Commit,
        path: &str,
    ) -> Result<Option<Vec<u8>>, GitterError>;

    /// Identifier used in logs and error messages
    fn describe(&self, commit: &Self::Commit) -> String;
}

/// Marker file convention used to obtain the base version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FindVersionMode {
    /// `version.txt` holds the base version as its entire content
    VersionTxt,
    /// `pom.xml` project version (not implemented)
    PomXml,
}

impl FindVersionMode {
    /// Name of the mode, which is also its marker file
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::VersionTxt => "version.txt",
            Self::PomXml => "pom.xml",
        }
    }

    /// Path of the marker file relative to the repository root
    #[must_use]
    pub fn marker_file(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for FindVersionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FindVersionMode {
    type Err = GitterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "version.txt" => Ok(Self::VersionTxt),
            "pom.xml" => Ok(Self::PomXml),
            other => Err(GitterError::UnsupportedMode {
                mode: other.to_string(),
            }),
        }
    }
}

/// A derived version: base token plus commit depth
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedVersion {
    /// Base version read from the marker file at the tip
    pub base: String,
    /// Commits since the marker last changed, excluding the tip itself
    pub depth: usize,
}

impl fmt::Display for DerivedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.base, self.depth)
    }
}

/// Token extractor for `version.txt`: the whole file, surrounding whitespace trimmed
///
/// # Errors
///
/// Never fails; the signature matches the extractor contract of [`derive_version`].
pub fn extract_version_txt(content: &str) -> Result<String, GitterError> {
    Ok(content.trim().to_string())
}

/// Derive the version using the marker convention of `mode`
///
/// # Errors
///
/// Returns `GitterError::UnsupportedMode` for [`FindVersionMode::PomXml`],
/// and otherwise any error from [`derive_version`].
pub fn find_version<A>(accessor: &A, mode: FindVersionMode) -> Result<String, GitterError>
where
    A: HistoryAccessor + ?Sized,
{
    match mode {
        FindVersionMode::VersionTxt => {
            derive_version(accessor, mode.marker_file(), extract_version_txt)
                .map(|version| version.to_string())
        }
        FindVersionMode::PomXml => Err(GitterError::UnsupportedMode {
            mode: mode.to_string(),
        }),
    }
}

/// Walk history and count commits sharing the tip's base version
///
/// `extract` maps the marker file's content at one commit to its base token.
/// The walk stops at the first commit whose token differs from the tip's;
/// that commit is not counted and nothing older is read.
///
/// # Errors
///
/// - `GitterError::MarkerNotFound` if `marker` is missing at a visited commit
/// - `GitterError::MarkerUnreadable` if its content is not UTF-8
/// - `GitterError::EmptyHistory` if there are no commits
/// - any error from the accessor or from `extract`, unchanged
pub fn derive_version<A, F>(
    accessor: &A,
    marker: &str,
    extract: F,
) -> Result<DerivedVersion, GitterError>
where
    A: HistoryAccessor + ?Sized,
    F: Fn(&str) -> Result<String, GitterError>,
{
    let mut derivation = Derivation::default();

    for commit in accessor.commit_history()? {
        let commit = commit?;
        let id = accessor.describe(&commit);

        let content = accessor
            .file_content_at(&commit, marker)?
            .ok_or_else(|| GitterError::MarkerNotFound {
                path: marker.to_string(),
                commit: id.clone(),
            })?;
        let content = String::from_utf8(content).map_err(|_| GitterError::MarkerUnreadable {
            path: marker.to_string(),
            commit: id.clone(),
        })?;

        let token = extract(&content)?;
        debug!(commit = %id, token = %token, depth = derivation.depth, "Visited commit");

        if derivation.observe(token).is_break() {
            debug!(commit = %id, "Version marker changed, stopping");
            break;
        }
    }

    let version = derivation.finish()?;
    info!(version = %version, marker, "Derived version");
    Ok(version)
}

/// Per-call traversal state
#[derive(Debug, Default)]
struct Derivation {
    current: Option<String>,
    depth: usize,
}

impl Derivation {
    fn observe(&mut self, token: String) -> ControlFlow<()> {
        if self.current.is_none() {
            self.current = Some(token);
            return ControlFlow::Continue(());
        }

        if self.current.as_deref() != Some(token.as_str()) {
            return ControlFlow::Break(());
        }

        self.depth += 1;
        ControlFlow::Continue(())
    }

    fn finish(self) -> Result<DerivedVersion, GitterError> {
        let base = self.current.ok_or(GitterError::EmptyHistory)?;
        Ok(DerivedVersion {
            base,
            depth: self.depth,
        })
    }
}
