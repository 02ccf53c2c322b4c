//! Test-only helpers: temporary trees and scripted command runners.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::io::shell::{CommandRunner, ShRunner, ShellOutcome, ShellRequest};

/// A temporary tree root holding a config file and directories.
pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("tempdir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write `tree.yaml` at the root and return its path.
    pub fn write_config(&self, yaml: &str) -> PathBuf {
        let path = self.root().join("tree.yaml");
        fs::write(&path, yaml).expect("write config");
        path
    }

    /// Create each `/`-separated directory below the root.
    pub fn mkdirs(&self, dirs: &[&str]) {
        for dir in dirs {
            fs::create_dir_all(self.root().join(dir)).expect("create dir");
        }
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Records every request and reports it as finished without spawning anything.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: RefCell<Vec<(String, String)>>,
    exit_code: i32,
}

impl RecordingRunner {
    /// Runner whose commands all finish with `exit_code`.
    pub fn exiting(exit_code: i32) -> Self {
        Self {
            exit_code,
            ..Self::default()
        }
    }

    pub fn paths(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(path, _)| path.clone()).collect()
    }

    pub fn commands(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(_, cmd)| cmd.clone()).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, request: &ShellRequest<'_>) -> Result<ShellOutcome> {
        self.calls
            .borrow_mut()
            .push((request.path.to_string(), request.command.to_string()));
        Ok(ShellOutcome::Finished(Some(self.exit_code)))
    }
}

/// Deletes `victim` on its first call, then runs through [`ShRunner`].
///
/// Simulates a directory disappearing between the existence check and
/// execution.
#[derive(Debug)]
pub struct VanishingRunner {
    victim: PathBuf,
    pub inner: RecordingRunner,
}

impl VanishingRunner {
    pub fn new(victim: impl Into<PathBuf>) -> Self {
        Self {
            victim: victim.into(),
            inner: RecordingRunner::default(),
        }
    }
}

impl CommandRunner for VanishingRunner {
    fn run(&self, request: &ShellRequest<'_>) -> Result<ShellOutcome> {
        if self.victim.is_dir() {
            fs::remove_dir_all(&self.victim).context("remove victim")?;
        }
        self.inner.run(request)?;
        ShRunner.run(request)
    }
}
