// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! gitter: git status decoding and history-derived versions
//!
//! This library crate decodes the machine-readable output of
//! `git status --porcelain` and derives a `<base>.<depth>` version by walking
//! commit history and comparing a marker file across commits. Repository
//! operations go through the [`Gitter`] trait, backed either by the `git`
//! executable or by libgit2.
//!
//! # Example
//!
//! ```no_run
//! use gitter::{Backend, FindVersionMode};
//!
//! let gitter = Backend::Runner.gitter(".");
//! let status = gitter.status().expect("status");
//! if status.is_clean() {
//!     let version = gitter.find_version(FindVersionMode::VersionTxt).expect("version");
//!     println!("{version}");
//! }
//! ```

#![warn(missing_docs)]

pub mod backend;
pub mod commit;
pub mod embedded;
pub mod error;
pub mod porcelain;
pub mod repo;
pub mod runner;
pub mod status;
pub mod version;

pub use backend::{AddArgs, Backend, CommitArgs, Gitter, InitArgs};
pub use commit::Commit;
pub use embedded::EmbeddedGitter;
pub use error::GitterError;
pub use porcelain::{parse_name_extra, parse_status_porcelain, parse_status_z};
pub use repo::GitRepo;
pub use runner::RunnerGitter;
pub use status::{FileStatus, Status, StatusCode, path_from_bytes};
pub use version::{
    DerivedVersion, FindVersionMode, HistoryAccessor, derive_version, extract_version_txt,
    find_version,
};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::backend::{Backend, Gitter};
    pub use crate::error::GitterError;
    pub use crate::porcelain::parse_status_z;
    pub use crate::status::{FileStatus, Status, StatusCode};
    pub use crate::version::{FindVersionMode, HistoryAccessor, find_version};
}
