// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! The `Gitter` capability and backend selection
//!
//! A [`Gitter`] performs the handful of write-path operations needed to set up
//! a repository (`init`, `add`, `commit`) and reports its [`Status`]. Two
//! implementations exist: [`RunnerGitter`] spawns the `git` executable and
//! [`EmbeddedGitter`] links libgit2. Callers treat them identically.

use crate::embedded::EmbeddedGitter;
use crate::error::GitterError;
use crate::repo::GitRepo;
use crate::runner::RunnerGitter;
use crate::status::Status;
use crate::version::FindVersionMode;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Arguments for [`Gitter::init`]
#[derive(Debug, Clone, Default)]
pub struct InitArgs {
    /// Create a bare repository
    pub bare: bool,
}

/// Arguments for [`Gitter::add`]
#[derive(Debug, Clone, Default)]
pub struct AddArgs {
    /// Paths to stage, absolute or relative to the working directory
    pub paths: Vec<PathBuf>,
}

impl AddArgs {
    /// Stage the given paths
    #[must_use]
    pub fn paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }
}

/// Arguments for [`Gitter::commit`]
#[derive(Debug, Clone, Default)]
pub struct CommitArgs {
    /// Stage modified and deleted tracked files before committing
    pub all: bool,
    /// Commit message
    pub message: String,
}

impl CommitArgs {
    /// Commit the index with `message`
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            all: false,
            message: message.into(),
        }
    }

    /// Also stage tracked modifications and deletions
    #[must_use]
    pub fn all(mut self) -> Self {
        self.all = true;
        self
    }
}

/// Repository operations shared by all backends
pub trait Gitter {
    /// Directory the backend operates on
    fn working_dir(&self) -> &Path;

    /// Create a repository in the working directory
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be created.
    fn init(&self, args: &InitArgs) -> Result<(), GitterError>;

    /// Stage paths
    ///
    /// # Errors
    ///
    /// Returns `GitterError::InvalidArgument` when `args.paths` is empty, and
    /// an error if any path cannot be staged.
    fn add(&self, args: &AddArgs) -> Result<(), GitterError>;

    /// Record a commit
    ///
    /// # Errors
    ///
    /// Returns an error if the commit cannot be created.
    fn commit(&self, args: &CommitArgs) -> Result<(), GitterError>;

    /// Report the working tree status
    ///
    /// # Errors
    ///
    /// Returns an error if status cannot be obtained.
    fn status(&self) -> Result<Status, GitterError>;

    /// Derive the version of the working directory's `HEAD`
    ///
    /// # Errors
    ///
    /// See [`crate::version::find_version`].
    fn find_version(&self, mode: FindVersionMode) -> Result<String, GitterError> {
        GitRepo::open(self.working_dir())?.find_version(mode)
    }
}

/// Which implementation of [`Gitter`] to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// Spawn the `git` executable
    #[default]
    Runner,
    /// Use libgit2 in-process
    Embedded,
}

impl Backend {
    /// All backends
    pub const ALL: [Backend; 2] = [Backend::Runner, Backend::Embedded];

    /// Name accepted by [`Backend::from_str`]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Runner => "runner",
            Self::Embedded => "embedded",
        }
    }

    /// Create a backend operating on `working_dir`
    #[must_use]
    pub fn gitter(self, working_dir: impl Into<PathBuf>) -> Box<dyn Gitter> {
        match self {
            Self::Runner => Box::new(RunnerGitter::new(working_dir)),
            Self::Embedded => Box::new(EmbeddedGitter::new(working_dir)),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = GitterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "runner" => Ok(Self::Runner),
            "embedded" => Ok(Self::Embedded),
            other => Err(GitterError::InvalidArgument {
                message: format!("unknown backend '{other}' (expected 'runner' or 'embedded')"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn test_backend_names_round_trip() {
        for backend in Backend::ALL {
            assert_eq!(backend.as_str().parse::<Backend>().unwrap(), backend);
        }
    }

    #[test]
    fn test_unknown_backend() {
        assert!(matches!(
            "go-git".parse::<Backend>(),
            Err(GitterError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_backend_gitter_keeps_working_dir() {
        for backend in Backend::ALL {
            let gitter = backend.gitter("/tmp/gitter-working");
            assert_eq!(gitter.working_dir(), Path::new("/tmp/gitter-working"));
        }
    }

    #[test]
    fn test_commit_args_builder() {
        let args = CommitArgs::message("initial").all();
        assert!(args.all);
        assert_eq!(args.message, "initial");
    }

    #[test]
    fn test_add_args_builder() {
        let args = AddArgs::paths(["README.md", "src/lib.rs"]);
        assert_eq!(
            args.paths,
            vec![PathBuf::from("README.md"), PathBuf::from("src/lib.rs")]
        );
    }
}
