// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for gitter

use thiserror::Error;

/// Errors that can occur during repository and version operations
#[derive(Debug, Error)]
pub enum GitterError {
    /// Error from git2 library while performing a named operation
    #[error("Git error while trying to {operation}: {source}")]
    Repository {
        /// What was being attempted when the library failed
        operation: String,
        /// The underlying library error
        #[source]
        source: git2::Error,
    },

    /// Repository not found at the specified path
    #[error("Repository not found: {path}")]
    RepositoryNotFound {
        /// The path that was searched for a repository
        path: String,
    },

    /// Invalid commit reference (branch, tag, or SHA)
    #[error("Invalid commit reference: {reference}")]
    InvalidReference {
        /// The reference string that could not be resolved
        reference: String,
    },

    /// Error spawning a process or touching the filesystem
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The external `git` executable exited unsuccessfully
    #[error("`{command}` failed with exit code {code:?}: {stderr}")]
    CommandFailed {
        /// The command line that was run
        command: String,
        /// Exit code, if the process was not killed by a signal
        code: Option<i32>,
        /// Captured standard error
        stderr: String,
    },

    /// The caller supplied arguments the operation cannot work with
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the problem
        message: String,
    },

    /// The version marker file is absent at a visited commit
    #[error("Unable to retrieve {path} at commit {commit}")]
    MarkerNotFound {
        /// Marker file path, relative to the repository root
        path: String,
        /// Commit at which the lookup failed
        commit: String,
    },

    /// The version marker file exists but its content is not valid UTF-8
    #[error("Unable to read {path} at commit {commit}: content is not valid UTF-8")]
    MarkerUnreadable {
        /// Marker file path, relative to the repository root
        path: String,
        /// Commit at which the read failed
        commit: String,
    },

    /// A version mode that is unknown or declared but not implemented
    #[error("Unsupported version mode: {mode}")]
    UnsupportedMode {
        /// The requested mode
        mode: String,
    },

    /// The repository has no commits to derive a version from
    #[error("No commits found to derive a version from")]
    EmptyHistory,
}

impl GitterError {
    /// Wrap a git2 error with the operation that produced it
    pub(crate) fn repository(operation: impl Into<String>) -> impl FnOnce(git2::Error) -> Self {
        let operation = operation.into();
        move |source| Self::Repository { operation, source }
    }
}
