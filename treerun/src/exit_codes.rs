//! Stable exit codes for the `trn` CLI.
//!
//! Every non-zero code is announced on stdout as `exit code: N` before the
//! process exits, so scripted callers can scrape it.

/// Run completed, or the user declined to continue past missing directories.
pub const OK: i32 = 0;
/// Input ended or failed while a selection prompt was waiting.
pub const SELECTION_ABORTED: i32 = 1;
/// The YAML input is missing, unreadable or malformed.
pub const MISSING_INPUT: i32 = 2;
/// None of the candidate directories exist.
pub const NO_DIRECTORIES: i32 = 3;
/// A placeholder could not be converted.
pub const PLACEHOLDER: i32 = 4;
/// The selected mode has no `cmd`/`command`.
pub const MISSING_COMMAND: i32 = 5;
/// The log file could not be written.
pub const LOG_WRITE: i32 = 6;
/// Any other runtime failure (e.g. the shell could not be launched).
pub const FAILURE: i32 = 7;

/// Code and one-line description for each exit code, printed by `trn --codes`.
pub const LEGEND: [(i32, &str); 8] = [
    (OK, "Completed"),
    (SELECTION_ABORTED, "A problem occurred during input-selection"),
    (MISSING_INPUT, "Missing or invalid YAML input"),
    (NO_DIRECTORIES, "The necessary directories could not be found"),
    (PLACEHOLDER, "Error converting placeholders"),
    (MISSING_COMMAND, "Missing mode-command"),
    (LOG_WRITE, "The log file could not be written"),
    (FAILURE, "Unexpected runtime failure"),
];

/// Description for `code`, if it is one of ours.
pub fn describe(code: i32) -> Option<&'static str> {
    LEGEND
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, text)| *text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn codes_are_distinct() {
        let codes: BTreeSet<i32> = LEGEND.iter().map(|(code, _)| *code).collect();
        assert_eq!(codes.len(), LEGEND.len());
    }

    #[test]
    fn describe_known_and_unknown() {
        assert_eq!(describe(MISSING_COMMAND), Some("Missing mode-command"));
        assert_eq!(describe(42), None);
    }
}
