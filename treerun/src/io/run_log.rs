//! Append-only run log (`trn -o <file>`).
//!
//! Each run appends one block:
//!
//! ```text
//! ————————…
//! Mode:         Mode 2
//! Submitted:    2024-05-01 14:03:11.512344
//! Root dir:     /data/tree
//!
//! Successfully submitted:
//! /dir1/subdir1/test-v2    ./run.sh
//!
//! Not found:
//! /dir2/subdir1/test-v2    ./run.sh
//! ```

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{DateTime, Local};
use tracing::info;

use crate::core::types::RunOutcome;
use crate::error::Halt;
use crate::io::console::{horizontal_line, tabulate};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

#[derive(Debug, Clone)]
pub struct RunLogEntry<'a> {
    pub mode: &'a str,
    pub command: &'a str,
    pub root: &'a Path,
    pub submitted: DateTime<Local>,
    pub outcome: &'a RunOutcome,
}

/// Where a log named `name` lives: relative names are placed under `root`.
pub fn log_path(root: &Path, name: &str) -> PathBuf {
    let path = Path::new(name);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Render one log block.
pub fn render_entry<W: Write + ?Sized>(out: &mut W, entry: &RunLogEntry<'_>) -> std::io::Result<()> {
    horizontal_line(out)?;
    tabulate(
        out,
        &[
            ("Mode:", entry.mode.to_string()),
            (
                "Submitted:",
                entry.submitted.format(TIMESTAMP_FORMAT).to_string(),
            ),
            ("Root dir:", entry.root.display().to_string()),
        ],
        None,
    )?;

    let width = Some(entry.outcome.longest_path());
    let rows = |paths: &[String]| -> Vec<(String, String)> {
        paths
            .iter()
            .map(|path| (path.clone(), entry.command.to_string()))
            .collect()
    };

    writeln!(out)?;
    writeln!(out, "Successfully submitted:")?;
    tabulate(out, &rows(&entry.outcome.successful), width)?;

    if !entry.outcome.unsuccessful.is_empty() {
        writeln!(out)?;
        writeln!(out, "Unsuccessful submissions:")?;
        tabulate(out, &rows(&entry.outcome.unsuccessful), width)?;
    }

    if !entry.outcome.not_found.is_empty() {
        writeln!(out)?;
        writeln!(out, "Not found:")?;
        tabulate(out, &rows(&entry.outcome.not_found), width)?;
    }
    Ok(())
}

/// Append `entry` to the log at `path`, creating the file if needed.
pub fn append_entry(path: &Path, entry: &RunLogEntry<'_>) -> Result<()> {
    let write = || -> std::io::Result<()> {
        let mut buf = Vec::new();
        render_entry(&mut buf, entry)?;
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(&buf)?;
        file.flush()
    };
    write().map_err(|source| Halt::LogWrite {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "appended run log");
    Ok(())
}
