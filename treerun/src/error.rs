//! Terminal outcomes of a run.
//!
//! A [`Halt`] travels inside `anyhow::Error` like any other failure; `main`
//! downcasts it to pick the exit code. Errors that are not a `Halt` map to
//! [`exit_codes::FAILURE`].

use std::path::PathBuf;

use thiserror::Error;

use crate::core::placeholder::PlaceholderError;
use crate::exit_codes;

#[derive(Debug, Error)]
pub enum Halt {
    #[error("input ended during selection")]
    SelectionAborted,

    #[error("user declined to continue")]
    Declined,

    #[error("invalid input {}: {reason}", path.display())]
    InvalidConfig { path: PathBuf, reason: String },

    #[error("could not locate the relevant directories")]
    NoDirectories,

    #[error("error converting placeholders in {context}: {source}")]
    Placeholder {
        context: String,
        #[source]
        source: PlaceholderError,
    },

    #[error("the selected mode '{mode}' has no command")]
    MissingCommand { mode: String },

    #[error("unable to write log file {}: {source}", path.display())]
    LogWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Halt {
    pub fn exit_code(&self) -> i32 {
        match self {
            Halt::SelectionAborted => exit_codes::SELECTION_ABORTED,
            Halt::Declined => exit_codes::OK,
            Halt::InvalidConfig { .. } => exit_codes::MISSING_INPUT,
            Halt::NoDirectories => exit_codes::NO_DIRECTORIES,
            Halt::Placeholder { .. } => exit_codes::PLACEHOLDER,
            Halt::MissingCommand { .. } => exit_codes::MISSING_COMMAND,
            Halt::LogWrite { .. } => exit_codes::LOG_WRITE,
        }
    }

    pub fn invalid_config(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Halt::InvalidConfig {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Exit code for any error produced by the crate.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<Halt>()
        .map(Halt::exit_code)
        .unwrap_or(exit_codes::FAILURE)
}
