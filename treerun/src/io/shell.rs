//! Shell command execution at a tree path.
//!
//! The [`CommandRunner`] trait decouples the run orchestrator from process
//! spawning. Each request names the tree root and the relative path explicitly;
//! the process-wide working directory is never changed.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use anyhow::{Context, Result};
use tracing::{debug, instrument, warn};

use crate::core::paths::resolve_dir;

/// One command submission.
#[derive(Debug, Clone)]
pub struct ShellRequest<'a> {
    pub root: &'a Path,
    /// `/`-prefixed path below `root`.
    pub path: &'a str,
    pub command: &'a str,
}

impl ShellRequest<'_> {
    pub fn workdir(&self) -> PathBuf {
        resolve_dir(self.root, self.path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellOutcome {
    /// The command ran to completion with this exit code (`None` if killed by
    /// a signal).
    Finished(Option<i32>),
    /// The working directory no longer exists.
    MissingDirectory,
}

/// Abstraction over command execution backends.
pub trait CommandRunner {
    fn run(&self, request: &ShellRequest<'_>) -> Result<ShellOutcome>;
}

/// Runs commands through `sh -c`, inheriting stdio.
#[derive(Debug, Clone, Default)]
pub struct ShRunner;

impl CommandRunner for ShRunner {
    #[instrument(skip_all, fields(path = request.path))]
    fn run(&self, request: &ShellRequest<'_>) -> Result<ShellOutcome> {
        let workdir = request.workdir();
        if !workdir.is_dir() {
            warn!(workdir = %workdir.display(), "run directory vanished before execution");
            return Ok(ShellOutcome::MissingDirectory);
        }

        debug!(command = request.command, "spawning sh");
        let status = match Command::new("sh")
            .arg("-c")
            .arg(request.command)
            .current_dir(&workdir)
            .status()
        {
            Ok(status) => status,
            // Lost the race between the check above and the spawn.
            Err(err) if err.kind() == ErrorKind::NotFound && !workdir.is_dir() => {
                warn!(workdir = %workdir.display(), "run directory vanished before execution");
                return Ok(ShellOutcome::MissingDirectory);
            }
            Err(err) => return Err(err).context("spawn sh"),
        };

        log_status(status);
        Ok(ShellOutcome::Finished(status.code()))
    }
}

fn log_status(status: ExitStatus) {
    if status.success() {
        debug!("command finished");
    } else {
        warn!(exit_code = ?status.code(), "command exited unsuccessfully");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn runs_in_requested_directory() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(temp.path().join("a/x")).expect("mkdir");

        let outcome = ShRunner
            .run(&ShellRequest {
                root: temp.path(),
                path: "/a/x",
                command: "touch marker",
            })
            .expect("run");

        assert_eq!(outcome, ShellOutcome::Finished(Some(0)));
        assert!(temp.path().join("a/x/marker").is_file());
    }

    #[test]
    fn nonzero_exit_is_still_finished() {
        let temp = tempfile::tempdir().expect("tempdir");
        let outcome = ShRunner
            .run(&ShellRequest {
                root: temp.path(),
                path: "/",
                command: "exit 3",
            })
            .expect("run");
        assert_eq!(outcome, ShellOutcome::Finished(Some(3)));
    }

    #[test]
    fn missing_directory_is_reported_not_raised() {
        let temp = tempfile::tempdir().expect("tempdir");
        let outcome = ShRunner
            .run(&ShellRequest {
                root: temp.path(),
                path: "/gone",
                command: "true",
            })
            .expect("run");
        assert_eq!(outcome, ShellOutcome::MissingDirectory);
    }
}
