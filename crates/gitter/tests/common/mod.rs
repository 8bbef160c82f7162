// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Test scaffolding for gitter integration tests
//!
//! A [`TestFixture`] owns a temporary directory holding a working repository
//! and a bare `origin.git`, both initialized through the backend under test.

#![allow(dead_code)]

use gitter::{AddArgs, Backend, CommitArgs, GitRepo, Gitter, InitArgs};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A working repository and a bare origin in a temporary directory
pub struct TestFixture {
    dir: TempDir,
    pub backend: Backend,
    pub working_dir: PathBuf,
    pub working: Box<dyn Gitter>,
    pub origin_dir: PathBuf,
    pub origin: Box<dyn Gitter>,
}

impl TestFixture {
    /// Create and initialize both repositories with `backend`
    pub fn new(backend: Backend) -> Self {
        let dir = tempfile::Builder::new()
            .prefix("gitter_test_")
            .tempdir()
            .expect("Failed to create temp dir");

        let working_dir = dir.path().join("working");
        let origin_dir = dir.path().join("origin.git");

        let working = backend.gitter(&working_dir);
        working
            .init(&InitArgs::default())
            .expect("Failed to init working repository");

        let origin = backend.gitter(&origin_dir);
        origin
            .init(&InitArgs { bare: true })
            .expect("Failed to init origin repository");

        let fixture = Self {
            dir,
            backend,
            working_dir,
            working,
            origin_dir,
            origin,
        };
        fixture.set_author("testfixture", "testfixture@example.com");
        fixture
    }

    /// Root of the temporary directory
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write identity into the working repository's local config
    fn set_author(&self, name: &str, email: &str) {
        let repo = git2::Repository::open(&self.working_dir).expect("Failed to open repository");
        let mut config = repo
            .config()
            .and_then(|c| c.open_level(git2::ConfigLevel::Local))
            .expect("Failed to load local config");
        config.set_str("user.name", name).expect("set user.name");
        config.set_str("user.email", email).expect("set user.email");
        config
            .set_bool("commit.gpgsign", false)
            .expect("set commit.gpgsign");
    }

    /// Path of `name` inside the working directory
    pub fn working_path(&self, name: &str) -> PathBuf {
        self.working_dir.join(name)
    }

    /// Write a file, creating parent directories as needed
    pub fn write_file(&self, name: &str, content: &str) {
        let file = self.working_path(name);
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&file, content).expect("Failed to write file");
    }

    /// Write a file and stage it
    pub fn write_file_and_add(&self, name: &str, content: &str) {
        self.write_file(name, content);
        self.working
            .add(&AddArgs::paths([name]))
            .expect("Failed to stage file");
    }

    /// Write, stage and commit a file
    pub fn write_file_and_add_and_commit(&self, name: &str, content: &str, message: &str) {
        self.write_file_and_add(name, content);
        self.commit(message);
    }

    /// Commit whatever is staged
    pub fn commit(&self, message: &str) {
        self.working
            .commit(&CommitArgs::message(message))
            .expect("Failed to commit");
    }

    /// libgit2 view of the working repository
    pub fn repo(&self) -> GitRepo {
        GitRepo::open(&self.working_dir).expect("Failed to open working repository")
    }
}
