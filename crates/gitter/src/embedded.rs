// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! [`Gitter`] backed by libgit2

use crate::backend::{AddArgs, CommitArgs, Gitter, InitArgs};
use crate::error::GitterError;
use crate::status::{FileStatus, Status, StatusCode, path_from_bytes};
use git2::{ErrorCode, IndexAddOption, Repository, StatusOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Performs every operation in-process through `git2`
#[derive(Debug, Clone)]
pub struct EmbeddedGitter {
    working_dir: PathBuf,
}

impl EmbeddedGitter {
    /// Operate on `working_dir`
    #[must_use]
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
        }
    }

    fn open(&self) -> Result<Repository, GitterError> {
        Repository::open(&self.working_dir).map_err(|_| GitterError::RepositoryNotFound {
            path: self.working_dir.display().to_string(),
        })
    }

    /// Express `path` relative to the repository's working tree
    fn relative_to_workdir(&self, workdir: &Path, path: &Path) -> Result<PathBuf, GitterError> {
        if path.is_relative() {
            return Ok(path.to_path_buf());
        }

        let canonical_dir = self.working_dir.canonicalize().ok();
        [Some(workdir), Some(self.working_dir.as_path()), canonical_dir.as_deref()]
            .into_iter()
            .flatten()
            .find_map(|base| path.strip_prefix(base).ok())
            .map(Path::to_path_buf)
            .ok_or_else(|| GitterError::InvalidArgument {
                message: format!(
                    "{} is outside the working tree {}",
                    path.display(),
                    workdir.display()
                ),
            })
    }
}

impl Gitter for EmbeddedGitter {
    fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    fn init(&self, args: &InitArgs) -> Result<(), GitterError> {
        let operation = format!("initialize {}", self.working_dir.display());
        if args.bare {
            Repository::init_bare(&self.working_dir).map_err(GitterError::repository(operation))?;
        } else {
            Repository::init(&self.working_dir).map_err(GitterError::repository(operation))?;
        }
        info!(path = %self.working_dir.display(), bare = args.bare, "Initialized repository");
        Ok(())
    }

    fn add(&self, args: &AddArgs) -> Result<(), GitterError> {
        if args.paths.is_empty() {
            return Err(GitterError::InvalidArgument {
                message: "add requires at least one path".to_string(),
            });
        }

        let repo = self.open()?;
        let workdir = repo
            .workdir()
            .ok_or_else(|| GitterError::InvalidArgument {
                message: "cannot add to a bare repository".to_string(),
            })?
            .to_path_buf();
        let mut index = repo.index().map_err(GitterError::repository("open index"))?;

        for path in &args.paths {
            let relative = self.relative_to_workdir(&workdir, path)?;
            let on_disk = workdir.join(&relative);
            let operation = format!("stage {}", relative.display());

            if on_disk.is_dir() {
                index
                    .add_all([relative.as_path()], IndexAddOption::DEFAULT, None)
                    .map_err(GitterError::repository(operation))?;
            } else if on_disk.exists() {
                index
                    .add_path(&relative)
                    .map_err(GitterError::repository(operation))?;
            } else {
                index
                    .remove_path(&relative)
                    .map_err(GitterError::repository(operation))?;
            }
            debug!(path = %relative.display(), "Staged path");
        }

        index.write().map_err(GitterError::repository("write index"))?;
        Ok(())
    }

    fn commit(&self, args: &CommitArgs) -> Result<(), GitterError> {
        let repo = self.open()?;
        let mut index = repo.index().map_err(GitterError::repository("open index"))?;

        if args.all {
            index
                .update_all(["*"], None)
                .map_err(GitterError::repository("stage tracked changes"))?;
            index.write().map_err(GitterError::repository("write index"))?;
        }

        let tree_id = index
            .write_tree()
            .map_err(GitterError::repository("write tree"))?;
        let tree = repo
            .find_tree(tree_id)
            .map_err(GitterError::repository("find tree"))?;
        let signature = repo
            .signature()
            .map_err(GitterError::repository("read user.name and user.email"))?;

        let parent = match repo.head() {
            Ok(head) => Some(
                head.peel_to_commit()
                    .map_err(GitterError::repository("resolve HEAD"))?,
            ),
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => None,
            Err(e) => {
                return Err(GitterError::Repository {
                    operation: "resolve HEAD".to_string(),
                    source: e,
                });
            }
        };
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        let oid = repo
            .commit(
                Some("HEAD"),
                &signature,
                &signature,
                &args.message,
                &tree,
                &parents,
            )
            .map_err(GitterError::repository("create commit"))?;
        info!(sha = %oid, "Created commit");
        Ok(())
    }

    fn status(&self) -> Result<Status, GitterError> {
        let repo = self.open()?;
        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(false)
            .include_ignored(false)
            .renames_head_to_index(true);

        let statuses = repo
            .statuses(Some(&mut options))
            .map_err(GitterError::repository("read status"))?;

        let mut status = Status::new();
        for entry in statuses.iter() {
            let flags = entry.status();
            if flags.is_ignored() {
                continue;
            }

            let (staging, worktree) = status_codes(flags);
            let mut file = FileStatus::new(staging, worktree);

            // Renamed entries are keyed by destination, with the origin as extra
            let delta = entry.head_to_index().or_else(|| entry.index_to_workdir());
            let renamed = delta.filter(|_| file.is_rename_or_copy());
            let path = match renamed {
                Some(delta) => {
                    file.extra = delta.old_file().path_bytes().map(path_from_bytes);
                    delta
                        .new_file()
                        .path_bytes()
                        .map(path_from_bytes)
                        .unwrap_or_default()
                }
                None => path_from_bytes(entry.path_bytes()),
            };

            status.insert(path, file);
        }

        Ok(status)
    }
}

/// Map libgit2 status flags onto the two short-format columns
fn status_codes(flags: git2::Status) -> (StatusCode, StatusCode) {
    if flags.is_conflicted() {
        return (StatusCode::UpdatedButUnmerged, StatusCode::UpdatedButUnmerged);
    }
    if flags.is_wt_new() {
        return (StatusCode::Untracked, StatusCode::Untracked);
    }

    let staging = if flags.is_index_new() {
        StatusCode::Added
    } else if flags.is_index_modified() {
        StatusCode::Modified
    } else if flags.is_index_deleted() {
        StatusCode::Deleted
    } else if flags.is_index_renamed() {
        StatusCode::Renamed
    } else if flags.is_index_typechange() {
        StatusCode::Other('T')
    } else {
        StatusCode::Unmodified
    };

    let worktree = if flags.is_wt_modified() {
        StatusCode::Modified
    } else if flags.is_wt_deleted() {
        StatusCode::Deleted
    } else if flags.is_wt_renamed() {
        StatusCode::Renamed
    } else if flags.is_wt_typechange() {
        StatusCode::Other('T')
    } else {
        StatusCode::Unmodified
    };

    (staging, worktree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn test_status_codes_untracked() {
        assert_eq!(
            status_codes(git2::Status::WT_NEW),
            (StatusCode::Untracked, StatusCode::Untracked)
        );
    }

    #[test]
    fn test_status_codes_staged_and_modified() {
        assert_eq!(
            status_codes(git2::Status::INDEX_NEW | git2::Status::WT_MODIFIED),
            (StatusCode::Added, StatusCode::Modified)
        );
        assert_eq!(
            status_codes(git2::Status::INDEX_MODIFIED | git2::Status::WT_DELETED),
            (StatusCode::Modified, StatusCode::Deleted)
        );
    }

    #[test]
    fn test_status_codes_rename_and_typechange() {
        assert_eq!(
            status_codes(git2::Status::INDEX_RENAMED),
            (StatusCode::Renamed, StatusCode::Unmodified)
        );
        assert_eq!(
            status_codes(git2::Status::WT_TYPECHANGE),
            (StatusCode::Unmodified, StatusCode::Other('T'))
        );
    }

    #[test]
    fn test_status_codes_conflict() {
        assert_eq!(
            status_codes(git2::Status::CONFLICTED),
            (StatusCode::UpdatedButUnmerged, StatusCode::UpdatedButUnmerged)
        );
    }

    #[test]
    fn test_relative_to_workdir() {
        let gitter = EmbeddedGitter::new("/work/repo");
        let workdir = Path::new("/work/repo/");
        assert_eq!(
            gitter
                .relative_to_workdir(workdir, Path::new("/work/repo/src/lib.rs"))
                .unwrap(),
            PathBuf::from("src/lib.rs")
        );
        assert_eq!(
            gitter
                .relative_to_workdir(workdir, Path::new("README.md"))
                .unwrap(),
            PathBuf::from("README.md")
        );
        assert!(matches!(
            gitter.relative_to_workdir(workdir, Path::new("/elsewhere/file")),
            Err(GitterError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_add_without_paths() {
        let gitter = EmbeddedGitter::new("/nonexistent/gitter");
        assert!(matches!(
            gitter.add(&AddArgs::default()),
            Err(GitterError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_status_outside_repository() {
        let gitter = EmbeddedGitter::new("/nonexistent/gitter");
        assert!(matches!(
            gitter.status(),
            Err(GitterError::RepositoryNotFound { .. })
        ));
    }
}
