//! Orchestration for one `trn` run.
//!
//! A run walks the tree from the root to the chosen leaves: pick a branch per
//! level, pick a mode, derive the run paths, confirm they exist, submit the
//! mode's command in each, and optionally append the outcome to the run log.

use std::collections::BTreeSet;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use tracing::{debug, info, instrument, warn};

use crate::core::paths::{candidate_paths, run_paths};
use crate::core::placeholder::{format_placeholders, substitute};
use crate::core::types::{ModeSpec, ModeSpecError, RunOutcome, Selection};
use crate::error::Halt;
use crate::io::config::TreeConfig;
use crate::io::console::{header, tabulate};
use crate::io::existence::check_directories;
use crate::io::prompt::SelectionSource;
use crate::io::run_log::{RunLogEntry, append_entry, log_path};
use crate::io::shell::{CommandRunner, ShellOutcome, ShellRequest};
use crate::select::{select_levels, select_mode};

/// Per-invocation settings from the command line.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Value for the `{mod}` placeholder.
    pub modifier: Option<String>,
    /// Directory names removed from every level.
    pub excluded: BTreeSet<String>,
    /// Take every non-excluded name at every level without prompting.
    pub select_all: bool,
    /// Run log name; may contain placeholders.
    pub log_file: Option<String>,
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub selection: Selection,
    pub mode: ModeSpec,
    pub outcome: RunOutcome,
    /// Where the run log was appended, if one was requested.
    pub log_path: Option<PathBuf>,
}

/// Run the interactive selection and submit the chosen mode across the tree.
///
/// Terminal outcomes surface as [`Halt`] errors: end of input during a prompt,
/// a declined confirmation, no existing directories, an unresolvable log name,
/// a mode without a command, or an unwritable log. A directory that disappears
/// after the existence check is recorded as unsuccessful and does not stop the
/// run.
#[instrument(skip_all, fields(root = %config.root.display()))]
pub fn climb<S, R, W>(
    config: &TreeConfig,
    options: &RunOptions,
    source: &mut S,
    runner: &R,
    out: &mut W,
) -> Result<RunReport>
where
    S: SelectionSource + ?Sized,
    R: CommandRunner + ?Sized,
    W: Write + ?Sized,
{
    let selection = select_levels(
        &config.levels,
        &options.excluded,
        options.select_all,
        source,
        out,
    )?;
    let entry = &config.modes[select_mode(&config.modes, source, out)?];

    let placeholders = config.placeholders(options.modifier.as_deref(), &entry.name);
    let params = substitute(&entry.params, &placeholders).map_err(|source| Halt::Placeholder {
        context: format!("mode '{}'", entry.name),
        source,
    })?;
    let mode = ModeSpec::from_params(&entry.name, &params).map_err(
        |ModeSpecError::MissingCommand { mode }| Halt::MissingCommand { mode },
    )?;
    debug!(mode = %mode.name, command = %mode.command, run_dir = %mode.run_dir, "mode resolved");

    // Resolved up front so a bad name fails before anything is submitted.
    let log_file = options
        .log_file
        .as_deref()
        .map(|name| {
            format_placeholders(name, &placeholders)
                .map(|name| log_path(&config.root, &name))
                .map_err(|source| Halt::Placeholder {
                    context: format!("log file name '{name}'"),
                    source,
                })
        })
        .transpose()?;

    print_summary(out, &mode, options.modifier.as_deref(), &selection)?;

    let paths = run_paths(&candidate_paths(&selection.levels), &mode.run_dir);
    debug!(count = paths.len(), "run paths derived");
    let report = check_directories(&paths, &config.root, source, out)?;

    let mut outcome = RunOutcome {
        found: report.found,
        not_found: report.not_found,
        ..RunOutcome::default()
    };

    header(out, "Submitting:")?;
    for path in &outcome.found {
        tabulate(
            out,
            &[("Moving to:", path.as_str()), ("Running:", mode.command.as_str())],
            None,
        )?;
        out.flush()?;

        let request = ShellRequest {
            root: &config.root,
            path,
            command: &mode.command,
        };
        match runner.run(&request)? {
            ShellOutcome::Finished(code) => {
                debug!(path = %path, exit_code = ?code, "submitted");
                outcome.successful.push(path.clone());
            }
            ShellOutcome::MissingDirectory => {
                warn!(path = %path, "directory vanished, skipping");
                writeln!(out, "No such directory: {}", request.workdir().display())?;
                writeln!(out, "Proceeding to next directory.")?;
                outcome.unsuccessful.push(path.clone());
            }
        }
    }
    info!(
        successful = outcome.successful.len(),
        unsuccessful = outcome.unsuccessful.len(),
        not_found = outcome.not_found.len(),
        "run finished"
    );

    if let Some(path) = &log_file {
        append_entry(
            path,
            &RunLogEntry {
                mode: &mode.name,
                command: &mode.command,
                root: &config.root,
                submitted: Local::now(),
                outcome: &outcome,
            },
        )?;
    }

    Ok(RunReport {
        selection,
        mode,
        outcome,
        log_path: log_file,
    })
}

fn print_summary<W: Write + ?Sized>(
    out: &mut W,
    mode: &ModeSpec,
    modifier: Option<&str>,
    selection: &Selection,
) -> std::io::Result<()> {
    header(out, "Summary:")?;
    let mut rows = vec![
        ("Mode:".to_string(), mode.name.clone()),
        ("Command:".to_string(), mode.command.clone()),
    ];
    if let Some(modifier) = modifier {
        rows.push(("Modifier:".to_string(), modifier.to_string()));
    }
    if !mode.run_dir.is_empty() {
        rows.push(("Run directory:".to_string(), mode.run_dir.clone()));
    }
    for level in &selection.levels {
        rows.push((level.name.clone(), level.dirs.join(", ")));
    }
    tabulate(out, &rows, None)
}
