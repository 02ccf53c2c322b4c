//! Shared deterministic types for the selection and path engine.
//!
//! These types define stable contracts between core components. They do not
//! depend on external state or I/O.

use thiserror::Error;

use crate::core::value::ParamValue;

/// One rank of the directory tree: a display name and its sibling directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    pub name: String,
    pub dirs: Vec<String>,
}

impl Level {
    pub fn new<I, S>(name: impl Into<String>, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }
}

/// The declared tree, levels in root-to-leaf order.
pub type LevelSpec = Vec<Level>;

/// Chosen directory names per level, in level order.
///
/// Has the same shape as [`LevelSpec`] with every level narrowed to the user's
/// choice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub levels: Vec<Level>,
}

/// A named entry from the `Modes` block, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeEntry {
    pub name: String,
    pub params: ParamValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModeSpecError {
    #[error("mode '{mode}' has no 'cmd' or 'command'")]
    MissingCommand { mode: String },
}

/// Canonical mode after placeholder substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeSpec {
    pub name: String,
    /// Full shell command, including any `args`.
    pub command: String,
    /// `/`-prefixed run subdirectory, or empty to run at the generated path.
    pub run_dir: String,
}

impl ModeSpec {
    /// Normalize a mode's parameter bag.
    ///
    /// Key precedence: `cmd` over `command`, `dir` over `directory`, `args`
    /// over `arguments`. The command must be a non-blank string.
    pub fn from_params(name: &str, params: &ParamValue) -> Result<Self, ModeSpecError> {
        let command = first_of(params, &["cmd", "command"])
            .and_then(ParamValue::as_scalar)
            .filter(|cmd| !cmd.trim().is_empty())
            .ok_or_else(|| ModeSpecError::MissingCommand {
                mode: name.to_string(),
            })?;

        let mut command = command.to_string();
        if let Some(args) = first_of(params, &["args", "arguments"]) {
            for arg in args.scalar_items() {
                command.push(' ');
                command.push_str(arg);
            }
        }

        let run_dir = first_of(params, &["dir", "directory"])
            .and_then(ParamValue::as_scalar)
            .map(|dir| dir.trim_start_matches('/'))
            .filter(|dir| !dir.is_empty())
            .map(|dir| format!("/{dir}"))
            .unwrap_or_default();

        Ok(Self {
            name: name.to_string(),
            command,
            run_dir,
        })
    }
}

fn first_of<'a>(params: &'a ParamValue, keys: &[&str]) -> Option<&'a ParamValue> {
    keys.iter().find_map(|key| params.get(key))
}

/// Per-path classification of a run.
///
/// `found` and `not_found` partition the checked paths; `successful` and
/// `unsuccessful` partition `found` once every command has been attempted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutcome {
    pub found: Vec<String>,
    pub not_found: Vec<String>,
    pub successful: Vec<String>,
    pub unsuccessful: Vec<String>,
}

impl RunOutcome {
    /// Length of the longest path across every section, for column alignment.
    pub fn longest_path(&self) -> usize {
        self.found
            .iter()
            .chain(&self.not_found)
            .chain(&self.unsuccessful)
            .map(|path| path.chars().count())
            .max()
            .unwrap_or(0)
    }
}
