//! Configuration for the gitter command
//!
//! Options come from command-line flags with environment-variable fallbacks,
//! and select the repository, the backend and the logging level.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gitter::{Backend, FindVersionMode};

/// gitter - git status decoding and history-derived versions
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "gitter")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Repository working directory
    ///
    /// Defaults to the current working directory.
    #[arg(short = 'C', long = "repo", env = "GITTER_REPO")]
    pub repo: Option<PathBuf>,

    /// Backend used for repository operations: "runner" spawns git,
    /// "embedded" uses libgit2
    #[arg(short, long, env = "GITTER_BACKEND", default_value = "runner")]
    pub backend: Backend,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr so stdout stays machine-readable.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create a repository in the working directory
    Init {
        /// Create a bare repository
        #[arg(long)]
        bare: bool,
    },

    /// Stage paths
    Add {
        /// Paths to stage
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Record a commit
    Commit {
        /// Commit message
        #[arg(short, long)]
        message: String,

        /// Stage modified and deleted tracked files first
        #[arg(short, long)]
        all: bool,
    },

    /// Show the working tree status
    ///
    /// Prints one `XY path` line per changed path, or a JSON object keyed by
    /// path with --json.
    Status {
        /// Print JSON instead of short-format lines
        #[arg(long)]
        json: bool,
    },

    /// Print the version derived from history
    ///
    /// The version is `<base>.<depth>`, where base is read from the marker
    /// file and depth counts the commits since the marker last changed.
    Version {
        /// Marker file convention ("version.txt" or "pom.xml")
        #[arg(short, long, default_value = "version.txt")]
        mode: FindVersionMode,
    },
}

impl Config {
    /// Get the repository path, using the current directory as default
    ///
    /// Returns `None` if no repository is specified and the current
    /// directory cannot be determined.
    #[must_use]
    pub fn repo_path(&self) -> Option<PathBuf> {
        self.repo.clone().or_else(|| std::env::current_dir().ok())
    }

    /// Validate the configuration
    ///
    /// `init` may target a directory that does not exist yet; every other
    /// command needs an existing directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository path cannot be determined, or is
    /// missing or not a directory when the command needs one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let repo = self.repo_path().ok_or(ConfigError::NoWorkingDirectory)?;

        if matches!(self.command, Some(Command::Init { .. })) {
            if repo.exists() && !repo.is_dir() {
                return Err(ConfigError::RepoNotDirectory(repo));
            }
            return Ok(());
        }

        if !repo.exists() {
            return Err(ConfigError::RepoNotFound(repo));
        }
        if !repo.is_dir() {
            return Err(ConfigError::RepoNotDirectory(repo));
        }

        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Repository path not found
    #[error("Repository path not found: {0}")]
    RepoNotFound(PathBuf),

    /// Repository path is not a directory
    #[error("Repository path is not a directory: {0}")]
    RepoNotDirectory(PathBuf),

    /// No path given and the current directory is unavailable
    #[error("Could not determine the current directory")]
    NoWorkingDirectory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.command.is_none());
        assert!(config.repo.is_none());
        assert_eq!(config.backend, Backend::Runner);
        assert!(!config.verbose);
        assert!(!config.quiet);
    }

    #[test]
    fn test_repo_path_default() {
        let config = Config::default();
        // Should fallback to current directory
        assert!(config.repo_path().is_some());
    }

    #[test]
    fn test_repo_path_custom() {
        let custom = PathBuf::from("/tmp");
        let config = Config {
            repo: Some(custom.clone()),
            ..Default::default()
        };
        assert_eq!(config.repo_path(), Some(custom));
    }

    #[test]
    fn test_log_level_default() {
        assert_eq!(Config::default().log_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_log_level_verbose_wins_over_quiet() {
        let config = Config {
            verbose: true,
            quiet: true,
            ..Default::default()
        };
        assert_eq!(config.log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_validate_nonexistent_repo() {
        let config = Config {
            repo: Some(PathBuf::from("/nonexistent/path/12345")),
            command: Some(Command::Status { json: false }),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::RepoNotFound(_))));
    }

    #[test]
    fn test_validate_init_allows_missing_directory() {
        let config = Config {
            repo: Some(PathBuf::from("/nonexistent/path/12345")),
            command: Some(Command::Init { bare: false }),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_valid_repo() {
        let config = Config {
            repo: Some(std::env::temp_dir()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
