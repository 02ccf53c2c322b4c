//! Interactive selection of tree branches and the run mode.

use std::collections::BTreeSet;
use std::io::Write;

use anyhow::{Result, bail};
use tracing::debug;

use crate::core::choice::{Answer, OptionKind, interpret, non_excluded};
use crate::core::types::{Level, ModeEntry, Selection};
use crate::error::Halt;
use crate::io::console::header;
use crate::io::prompt::SelectionSource;

const LEVEL_PROMPT: &str = "Enter an integer to select an option (press enter to select all): ";
const MODE_PROMPT: &str = "Select an option: ";

/// Choose directory names level by level.
///
/// Each level is listed with 1-based indices; excluded names are marked and
/// can never be chosen. With `select_all` the prompt is skipped and every
/// non-excluded name is taken.
pub fn select_levels<S, W>(
    levels: &[Level],
    excluded: &BTreeSet<String>,
    select_all: bool,
    source: &mut S,
    out: &mut W,
) -> Result<Selection>
where
    S: SelectionSource + ?Sized,
    W: Write + ?Sized,
{
    let mut selection = Selection::default();
    for level in levels {
        header(out, &level.name)?;
        for (i, dir) in level.dirs.iter().enumerate() {
            if excluded.contains(dir) {
                writeln!(out, "({}) {dir} (excluded)", i + 1)?;
            } else {
                writeln!(out, "({}) {dir}", i + 1)?;
            }
        }

        let dirs = if select_all {
            non_excluded(&level.dirs, excluded)
        } else {
            let answer = prompt_until_valid(
                LEVEL_PROMPT,
                &level.dirs,
                excluded,
                OptionKind::List,
                source,
                out,
            )?;
            match answer {
                Answer::One(index) => vec![level.dirs[index].clone()],
                _ => non_excluded(&level.dirs, excluded),
            }
        };
        debug!(level = %level.name, chosen = ?dirs, "level selected");
        selection.levels.push(Level {
            name: level.name.clone(),
            dirs,
        });
    }
    Ok(selection)
}

/// Choose exactly one mode; returns its index in `modes`.
pub fn select_mode<S, W>(modes: &[ModeEntry], source: &mut S, out: &mut W) -> Result<usize>
where
    S: SelectionSource + ?Sized,
    W: Write + ?Sized,
{
    header(out, "Select mode:")?;
    let names: Vec<String> = modes.iter().map(|mode| mode.name.clone()).collect();
    for (i, name) in names.iter().enumerate() {
        writeln!(out, "({}) {name}", i + 1)?;
    }

    // Modes are never excluded and never selected all at once.
    let answer = prompt_until_valid(
        MODE_PROMPT,
        &names,
        &BTreeSet::new(),
        OptionKind::Map,
        source,
        out,
    )?;
    match answer {
        Answer::One(index) => {
            debug!(mode = %names[index], "mode selected");
            Ok(index)
        }
        other => bail!("mode selection committed {other:?}"),
    }
}

/// Ask until the answer is committable. End of input aborts the run.
fn prompt_until_valid<S, W>(
    prompt: &str,
    options: &[String],
    excluded: &BTreeSet<String>,
    kind: OptionKind,
    source: &mut S,
    out: &mut W,
) -> Result<Answer>
where
    S: SelectionSource + ?Sized,
    W: Write + ?Sized,
{
    loop {
        out.flush()?;
        let input = source.ask(prompt)?.ok_or(Halt::SelectionAborted)?;
        match interpret(&input, options, excluded, kind) {
            Answer::Retry(rejection) => {
                debug!(input = %input, %rejection, "answer rejected");
                writeln!(out, "{rejection}")?;
            }
            committed => return Ok(committed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value::ParamValue;
    use crate::io::prompt::ScriptedSource;

    fn tree() -> Vec<Level> {
        vec![Level::new("L1", ["a", "b", "c"]), Level::new("L2", ["x", "y"])]
    }

    fn excluded(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn modes(names: &[&str]) -> Vec<ModeEntry> {
        names
            .iter()
            .map(|name| ModeEntry {
                name: name.to_string(),
                params: ParamValue::Mapping(vec![("cmd".to_string(), ParamValue::scalar("ls"))]),
            })
            .collect()
    }

    fn dirs(selection: &Selection) -> Vec<Vec<&str>> {
        selection
            .levels
            .iter()
            .map(|level| level.dirs.iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn select_all_skips_prompts_and_drops_excluded() {
        let mut source = ScriptedSource::new(Vec::<String>::new());
        let mut out = Vec::new();
        let selection =
            select_levels(&tree(), &excluded(&["b"]), true, &mut source, &mut out).expect("select");

        assert_eq!(dirs(&selection), vec![vec!["a", "c"], vec!["x", "y"]]);
        assert!(source.prompts().is_empty());
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("(2) b (excluded)"));
    }

    #[test]
    fn integer_picks_one_and_enter_picks_all() {
        let mut source = ScriptedSource::new(["3", ""]);
        let selection = select_levels(&tree(), &BTreeSet::new(), false, &mut source, &mut Vec::new())
            .expect("select");
        assert_eq!(dirs(&selection), vec![vec!["c"], vec!["x", "y"]]);
    }

    #[test]
    fn invalid_answers_reprompt() {
        let mut source = ScriptedSource::new(["9", "2", "abc", "1", "*"]);
        let mut out = Vec::new();
        let selection =
            select_levels(&tree(), &excluded(&["b"]), false, &mut source, &mut out).expect("select");

        assert_eq!(dirs(&selection), vec![vec!["a"], vec!["x", "y"]]);
        assert_eq!(source.prompts().len(), 5);
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("Integer selections must be between 1 and 3"));
        assert!(text.contains("This option has been excluded. Please select another."));
        assert!(text.contains("Enter an integer or press enter to select all."));
    }

    #[test]
    fn end_of_input_aborts_level_selection() {
        let mut source = ScriptedSource::new(["1"]);
        let err = select_levels(&tree(), &BTreeSet::new(), false, &mut source, &mut Vec::new())
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Halt>(),
            Some(Halt::SelectionAborted)
        ));
    }

    #[test]
    fn mode_selection_requires_a_single_index() {
        let mut source = ScriptedSource::new(["", "*", "2"]);
        let mut out = Vec::new();
        let index = select_mode(&modes(&["build", "clean"]), &mut source, &mut out).expect("mode");

        assert_eq!(index, 1);
        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(text.matches("Only one mode at a time can be selected.").count(), 2);
    }

    #[test]
    fn mode_names_are_not_subject_to_exclusion() {
        // A mode named like an excluded directory is still selectable.
        let mut source = ScriptedSource::new(["1"]);
        let index = select_mode(&modes(&["b"]), &mut source, &mut Vec::new()).expect("mode");
        assert_eq!(index, 0);
    }

    #[test]
    fn end_of_input_aborts_mode_selection() {
        let mut source = ScriptedSource::new(Vec::<String>::new());
        let err = select_mode(&modes(&["build"]), &mut source, &mut Vec::new()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Halt>(),
            Some(Halt::SelectionAborted)
        ));
    }
}
