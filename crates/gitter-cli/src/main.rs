//! gitter: git status decoding and history-derived versions
//!
//! This binary crate wraps the gitter library: it initializes repositories,
//! stages and commits files, prints decoded status, and prints the version
//! derived from a marker file in history.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use gitter_cli::commands;
use gitter_cli::config::Config;

fn main() -> ExitCode {
    let config = Config::parse();

    // Logs go to stderr so status and version output stay parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = commands::run(&config, &mut out).and_then(|()| Ok(out.flush()?));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
