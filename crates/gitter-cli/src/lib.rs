//! gitter command-line library
//!
//! This module exports the configuration and command dispatch of the
//! `gitter` binary for use in integration tests.

pub mod commands;
pub mod config;
