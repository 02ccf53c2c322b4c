//! Existence check for candidate run directories.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use tracing::{debug, info};

use crate::core::paths::resolve_dir;
use crate::error::Halt;
use crate::io::console::header;
use crate::io::prompt::SelectionSource;

const CONTINUE_PROMPT: &str = "Do you still want to continue (y/[n])? ";

/// Paths split by whether `root + path` is an existing directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExistenceReport {
    pub found: Vec<String>,
    pub not_found: Vec<String>,
}

pub fn partition_existing(paths: &[String], root: &Path) -> ExistenceReport {
    let mut report = ExistenceReport::default();
    for path in paths {
        if resolve_dir(root, path).is_dir() {
            report.found.push(path.clone());
        } else {
            report.not_found.push(path.clone());
        }
    }
    report
}

/// Check `paths` under `root` and decide whether the run may proceed.
///
/// - Nothing found: [`Halt::NoDirectories`].
/// - Some missing: ask the user; anything but `y`/`yes` is [`Halt::Declined`],
///   end of input is [`Halt::SelectionAborted`]. Only case is folded.
/// - All found: proceed.
pub fn check_directories<S, W>(
    paths: &[String],
    root: &Path,
    source: &mut S,
    out: &mut W,
) -> Result<ExistenceReport>
where
    S: SelectionSource + ?Sized,
    W: Write + ?Sized,
{
    let report = partition_existing(paths, root);
    debug!(
        found = report.found.len(),
        not_found = report.not_found.len(),
        "checked directories"
    );
    header(out, "Checking directories:")?;

    if report.found.is_empty() {
        writeln!(out, "Could not locate the relevant directories.")?;
        writeln!(out)?;
        writeln!(
            out,
            "Please make sure that the appropriate directories exist and that all modifiers"
        )?;
        writeln!(out, "in the YAML input (if any) have been supplied.")?;
        return Err(Halt::NoDirectories.into());
    }

    if !report.not_found.is_empty() {
        writeln!(out, "Unable to locate the following directories:")?;
        for path in &report.not_found {
            writeln!(out, "{path}")?;
        }
        out.flush()?;
        let answer = source.ask(CONTINUE_PROMPT)?.ok_or(Halt::SelectionAborted)?;
        if !is_yes(&answer) {
            info!(answer = %answer, "user declined to continue");
            writeln!(out, "Closing.")?;
            return Err(Halt::Declined.into());
        }
        return Ok(report);
    }

    writeln!(out, "All relevant directories exist.")?;
    writeln!(out)?;
    writeln!(out, "Proceeding with submission attempt.")?;
    Ok(report)
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.to_lowercase().as_str(), "y" | "yes")
}
