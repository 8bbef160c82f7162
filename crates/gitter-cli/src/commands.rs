// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Subcommand dispatch
//!
//! Each subcommand maps onto one [`Gitter`] operation. Results go to the
//! supplied writer; logs go through `tracing`.

use std::io::Write;

use anyhow::{Context, Result};
use gitter::{AddArgs, CommitArgs, FindVersionMode, Gitter, InitArgs};
use tracing::{debug, info};

use crate::config::{Command, Config};

/// Run the configured subcommand against the configured repository
///
/// # Errors
///
/// Returns an error if the configuration is invalid, no subcommand was
/// given, or the repository operation fails.
pub fn run(config: &Config, out: &mut impl Write) -> Result<()> {
    config.validate().context("Invalid configuration")?;

    let repo = config
        .repo_path()
        .context("Could not determine the repository path")?;
    let command = config
        .command
        .as_ref()
        .context("No command given (try --help)")?;

    let gitter = config.backend.gitter(&repo);
    debug!(
        repo = %repo.display(),
        backend = %config.backend,
        "Dispatching {}",
        command_name(command)
    );

    match command {
        Command::Init { bare } => init(gitter.as_ref(), *bare),
        Command::Add { paths } => gitter
            .add(&AddArgs::paths(paths.iter().cloned()))
            .context("Failed to stage paths"),
        Command::Commit { message, all } => commit(gitter.as_ref(), message, *all),
        Command::Status { json } => status(gitter.as_ref(), *json, out),
        Command::Version { mode } => version(gitter.as_ref(), *mode, out),
    }
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Init { .. } => "init",
        Command::Add { .. } => "add",
        Command::Commit { .. } => "commit",
        Command::Status { .. } => "status",
        Command::Version { .. } => "version",
    }
}

fn init(gitter: &dyn Gitter, bare: bool) -> Result<()> {
    gitter.init(&InitArgs { bare }).with_context(|| {
        format!(
            "Failed to initialize repository at {}",
            gitter.working_dir().display()
        )
    })
}

fn commit(gitter: &dyn Gitter, message: &str, all: bool) -> Result<()> {
    let mut args = CommitArgs::message(message);
    if all {
        args = args.all();
    }
    gitter.commit(&args).context("Failed to commit")
}

fn status(gitter: &dyn Gitter, json: bool, out: &mut impl Write) -> Result<()> {
    let status = gitter.status().context("Failed to read status")?;
    info!(entries = status.len(), clean = status.is_clean(), "Read status");

    if json {
        serde_json::to_writer_pretty(&mut *out, &status).context("Failed to encode status")?;
        writeln!(out)?;
    } else {
        write!(out, "{status}")?;
    }
    Ok(())
}

fn version(gitter: &dyn Gitter, mode: FindVersionMode, out: &mut impl Write) -> Result<()> {
    let version = gitter
        .find_version(mode)
        .with_context(|| format!("Failed to derive version from {}", mode.marker_file()))?;
    writeln!(out, "{version}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_run_without_command_fails() {
        let config = Config {
            repo: Some(std::env::temp_dir()),
            ..Default::default()
        };
        let mut out = Vec::new();
        let err = run(&config, &mut out).unwrap_err();
        assert!(err.to_string().contains("No command given"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_run_with_missing_repo_fails_validation() {
        let config = Config {
            repo: Some(PathBuf::from("/nonexistent/gitter/repo")),
            command: Some(Command::Status { json: false }),
            ..Default::default()
        };
        let err = run(&config, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("Invalid configuration"));
    }

    #[test]
    fn test_command_names() {
        assert_eq!(command_name(&Command::Init { bare: true }), "init");
        assert_eq!(
            command_name(&Command::Version {
                mode: FindVersionMode::VersionTxt
            }),
            "version"
        );
    }
}
