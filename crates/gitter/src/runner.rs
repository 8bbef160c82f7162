// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! [`Gitter`] backed by the `git` executable

use crate::backend::{AddArgs, CommitArgs, Gitter, InitArgs};
use crate::error::GitterError;
use crate::porcelain::parse_status_z;
use crate::status::{Status, path_from_bytes};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Runs `git -C <working_dir> ...` for every operation
#[derive(Debug, Clone)]
pub struct RunnerGitter {
    working_dir: PathBuf,
    program: OsString,
}

impl RunnerGitter {
    /// Operate on `working_dir` using `git` from `PATH`
    #[must_use]
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            program: OsString::from("git"),
        }
    }

    /// Use a specific executable instead of `git`
    #[must_use]
    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    /// Run one git command and return its stdout
    fn run<I, S>(&self, args: I) -> Result<Vec<u8>, GitterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-C").arg(&self.working_dir).args(args);
        let command = describe(&cmd);

        let output = cmd.output()?;
        if !output.status.success() {
            return Err(GitterError::CommandFailed {
                command,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        debug!(
            command = %command,
            stdout = %String::from_utf8_lossy(&output.stdout),
            "git finished"
        );
        Ok(output.stdout)
    }
}

fn describe(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

impl Gitter for RunnerGitter {
    fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    fn init(&self, args: &InitArgs) -> Result<(), GitterError> {
        // -C needs the directory to exist before git starts
        std::fs::create_dir_all(&self.working_dir)?;

        let mut cmd_args = vec!["init"];
        if args.bare {
            cmd_args.push("--bare");
        }
        self.run(cmd_args)?;
        Ok(())
    }

    fn add(&self, args: &AddArgs) -> Result<(), GitterError> {
        if args.paths.is_empty() {
            return Err(GitterError::InvalidArgument {
                message: "add requires at least one path".to_string(),
            });
        }

        let mut cmd_args: Vec<&OsStr> = vec![OsStr::new("add"), OsStr::new("--")];
        cmd_args.extend(args.paths.iter().map(|p| p.as_os_str()));
        self.run(cmd_args)?;
        Ok(())
    }

    fn commit(&self, args: &CommitArgs) -> Result<(), GitterError> {
        let mut cmd_args = vec!["commit", "--quiet", "-m", args.message.as_str()];
        if args.all {
            cmd_args.push("--all");
        }
        self.run(cmd_args)?;
        Ok(())
    }

    fn status(&self) -> Result<Status, GitterError> {
        let stdout = self.run(["status", "--porcelain", "-z"])?;
        Ok(parse_status_z(&path_from_bytes(&stdout)))
    }
}
