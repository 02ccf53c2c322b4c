//! Validation of a single prompt answer.
//!
//! Each prompt loops `Prompting → Validated → Committed`: the selection engine
//! reads a line, [`interpret`] validates it against the numbered options, and
//! only `One`/`All` answers are committed. Every rejection re-prompts with the
//! rejection's message.

use std::collections::BTreeSet;
use std::fmt;

/// What is being chosen from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Directory names of a level; "select all" is allowed.
    List,
    /// Modes; exactly one must be chosen.
    Map,
}

/// Outcome of validating one answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Zero-based index of the single chosen option.
    One(usize),
    /// Every non-excluded option.
    All,
    Retry(Rejection),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    OutOfRange { count: usize },
    Excluded,
    SingleModeOnly,
    Usage,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::OutOfRange { count } => {
                write!(f, "Integer selections must be between 1 and {count}")
            }
            Rejection::Excluded => write!(f, "This option has been excluded. Please select another."),
            Rejection::SingleModeOnly => write!(f, "Only one mode at a time can be selected."),
            Rejection::Usage => write!(f, "Enter an integer or press enter to select all."),
        }
    }
}

/// Validate `input` (line terminator already stripped) against `options`.
///
/// A run of ASCII digits names a 1-based option. Empty input or `*` selects
/// all, for [`OptionKind::List`] only. Options present in `excluded` cannot be
/// chosen individually.
pub fn interpret(
    input: &str,
    options: &[String],
    excluded: &BTreeSet<String>,
    kind: OptionKind,
) -> Answer {
    if !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit()) {
        let count = options.len();
        let index = match input.parse::<usize>() {
            Ok(n) if (1..=count).contains(&n) => n - 1,
            _ => return Answer::Retry(Rejection::OutOfRange { count }),
        };
        if excluded.contains(&options[index]) {
            return Answer::Retry(Rejection::Excluded);
        }
        return Answer::One(index);
    }

    match kind {
        OptionKind::List if input.is_empty() || input == "*" => Answer::All,
        OptionKind::List => Answer::Retry(Rejection::Usage),
        OptionKind::Map => Answer::Retry(Rejection::SingleModeOnly),
    }
}

/// Options not in `excluded`, in order.
pub fn non_excluded(options: &[String], excluded: &BTreeSet<String>) -> Vec<String> {
    options
        .iter()
        .filter(|option| !excluded.contains(*option))
        .cloned()
        .collect()
}
