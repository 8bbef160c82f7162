// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! libgit2-backed repository access
//!
//! [`GitRepo`] wraps a `git2::Repository` and implements [`HistoryAccessor`]
//! with a lazy revwalk, so version derivation only loads the commits it
//! actually visits.

use crate::commit::Commit;
use crate::error::GitterError;
use crate::version::{self, CommitIter, FindVersionMode, HistoryAccessor};
use git2::{ErrorCode, ObjectType, Oid, Repository, Sort};
use std::path::Path;

/// A git repository wrapper for reading history
pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Open a git repository at the given path
    ///
    /// # Errors
    ///
    /// Returns `GitterError::RepositoryNotFound` if the path is not a git repository.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GitterError> {
        let path = path.as_ref();
        let repo = Repository::open(path).map_err(|_| GitterError::RepositoryNotFound {
            path: path.display().to_string(),
        })?;
        Ok(Self { repo })
    }

    /// Discover and open a git repository containing the given path
    ///
    /// This walks up the directory tree to find a `.git` directory.
    ///
    /// # Errors
    ///
    /// Returns `GitterError::RepositoryNotFound` if no repository is found.
    pub fn discover(path: impl AsRef<Path>) -> Result<Self, GitterError> {
        let path = path.as_ref();
        let repo = Repository::discover(path).map_err(|_| GitterError::RepositoryNotFound {
            path: path.display().to_string(),
        })?;
        Ok(Self { repo })
    }

    /// Wrap an already opened repository
    #[must_use]
    pub fn from_repository(repo: Repository) -> Self {
        Self { repo }
    }

    /// Check if the repository is bare
    #[must_use]
    pub fn is_bare(&self) -> bool {
        self.repo.is_bare()
    }

    /// Get the working directory path (None for bare repos)
    #[must_use]
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// Get the HEAD commit SHA
    ///
    /// # Errors
    ///
    /// Returns `GitterError::InvalidReference` if HEAD does not point at a commit.
    pub fn head_sha(&self) -> Result<String, GitterError> {
        let head = self
            .repo
            .head()
            .map_err(|_| GitterError::InvalidReference {
                reference: "HEAD".to_string(),
            })?;
        let oid = head.target().ok_or_else(|| GitterError::InvalidReference {
            reference: "HEAD".to_string(),
        })?;
        Ok(oid.to_string())
    }

    /// Derive the version for the current `HEAD`
    ///
    /// # Errors
    ///
    /// See [`version::find_version`].
    pub fn find_version(&self, mode: FindVersionMode) -> Result<String, GitterError> {
        version::find_version(self, mode)
    }

    fn find_commit(&self, sha: &str) -> Result<git2::Commit<'_>, GitterError> {
        let oid = Oid::from_str(sha).map_err(|_| GitterError::InvalidReference {
            reference: sha.to_string(),
        })?;
        self.repo
            .find_commit(oid)
            .map_err(GitterError::repository(format!("find commit {sha}")))
    }
}

impl HistoryAccessor for GitRepo {
    type Commit = Commit;

    fn commit_history(&self) -> Result<CommitIter<'_, Commit>, GitterError> {
        let mut revwalk = self
            .repo
            .revwalk()
            .map_err(GitterError::repository("start revwalk"))?;
        revwalk
            .set_sorting(Sort::TOPOLOGICAL | Sort::TIME)
            .map_err(GitterError::repository("sort revwalk"))?;
        revwalk
            .push_head()
            .map_err(GitterError::repository("resolve HEAD"))?;

        Ok(Box::new(revwalk.map(move |oid| {
            let oid = oid.map_err(GitterError::repository("walk history"))?;
            let git_commit = self
                .repo
                .find_commit(oid)
                .map_err(GitterError::repository(format!("find commit {oid}")))?;
            Ok(Commit::from_git2(&git_commit))
        })))
    }

    fn file_content_at(&self, commit: &Commit, path: &str) -> Result<Option<Vec<u8>>, GitterError> {
        let tree = self
            .find_commit(&commit.sha)?
            .tree()
            .map_err(GitterError::repository(format!(
                "read tree of {}",
                commit.short_sha()
            )))?;

        let entry = match tree.get_path(Path::new(path)) {
            Ok(entry) => entry,
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(None),
            Err(e) => {
                return Err(GitterError::Repository {
                    operation: format!("look up {path} in {}", commit.short_sha()),
                    source: e,
                });
            }
        };

        // A directory at the marker path is as good as no marker at all
        if entry.kind() != Some(ObjectType::Blob) {
            return Ok(None);
        }

        let blob = self
            .repo
            .find_blob(entry.id())
            .map_err(GitterError::repository(format!("read blob {path}")))?;
        Ok(Some(blob.content().to_vec()))
    }

    fn describe(&self, commit: &Commit) -> String {
        commit.short_sha().to_string()
    }
}
