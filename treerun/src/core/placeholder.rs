//! `{name}` placeholder substitution for mode parameters and log names.
//!
//! The syntax follows Python's `str.format` for named fields: `{name}` is
//! replaced, `{{` and `}}` produce literal braces, and any other brace is an
//! error.
//!
//! # Depth contract
//!
//! [`substitute`] rewrites strings at most one container level below the value
//! it is given:
//!
//! ```text
//! Mapping                       <- given value
//!   cmd: "echo {mod}"           <- rewritten
//!   args: ["-m", "{mod}"]       <- rewritten (direct child container)
//!   env: { TAG: "{mod}" }       <- rewritten (direct child container)
//!   deep: { a: ["{mod}"] }      <- "{mod}" left as-is (two levels down)
//! ```

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::warn;

use crate::core::value::ParamValue;

/// Placeholder name → replacement text.
pub type Placeholders = BTreeMap<String, String>;

static FIELD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{|\}\}|\{([^{}]*)\}|[{}]").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaceholderError {
    #[error("unresolved placeholder '{{{name}}}'")]
    Unresolved { name: String },
    #[error("unbalanced brace at byte {position}")]
    Unbalanced { position: usize },
    #[error("placeholder '{name}' must be a scalar value")]
    NonScalar { name: String },
}

/// Replace every `{name}` in `template` with its value from `placeholders`.
pub fn format_placeholders(
    template: &str,
    placeholders: &Placeholders,
) -> Result<String, PlaceholderError> {
    if !template.contains(['{', '}']) {
        return Ok(template.to_string());
    }

    let mut out = String::with_capacity(template.len());
    let mut last = 0;
    for caps in FIELD_RE.captures_iter(template) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&template[last..whole.start()]);
        last = whole.end();

        match (whole.as_str(), caps.get(1)) {
            ("{{", _) => out.push('{'),
            ("}}", _) => out.push('}'),
            (_, Some(name)) => {
                let value = placeholders.get(name.as_str()).ok_or_else(|| {
                    PlaceholderError::Unresolved {
                        name: name.as_str().to_string(),
                    }
                })?;
                out.push_str(value);
            }
            _ => {
                return Err(PlaceholderError::Unbalanced {
                    position: whole.start(),
                });
            }
        }
    }
    out.push_str(&template[last..]);
    Ok(out)
}

/// Return a copy of `value` with placeholders substituted.
///
/// A top-level scalar is formatted strictly and its error returned. Inside
/// containers a failing string is kept verbatim and a warning is logged, so one
/// unpopulated placeholder never blocks the rest of the bag.
pub fn substitute(
    value: &ParamValue,
    placeholders: &Placeholders,
) -> Result<ParamValue, PlaceholderError> {
    match value {
        ParamValue::Scalar(text) => format_placeholders(text, placeholders).map(ParamValue::Scalar),
        container => Ok(substitute_container(container, placeholders, 1)),
    }
}

/// `depth` counts how many container levels below this one may still be
/// rewritten.
fn substitute_container(value: &ParamValue, placeholders: &Placeholders, depth: u8) -> ParamValue {
    let rewrite = |item: &ParamValue| match item {
        ParamValue::Scalar(text) => ParamValue::Scalar(lenient_format(text, placeholders)),
        nested if depth > 0 => substitute_container(nested, placeholders, depth - 1),
        nested => nested.clone(),
    };

    match value {
        ParamValue::Scalar(_) => rewrite(value),
        ParamValue::Sequence(items) => ParamValue::Sequence(items.iter().map(rewrite).collect()),
        ParamValue::Mapping(entries) => ParamValue::Mapping(
            entries
                .iter()
                .map(|(key, item)| (key.clone(), rewrite(item)))
                .collect(),
        ),
    }
}

fn lenient_format(text: &str, placeholders: &Placeholders) -> String {
    match format_placeholders(text, placeholders) {
        Ok(formatted) => formatted,
        Err(err) => {
            warn!(template = %text, error = %err, "unable to convert placeholders, keeping original");
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> Placeholders {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn entry(key: &str, value: ParamValue) -> (String, ParamValue) {
        (key.to_string(), value)
    }

    #[test]
    fn plain_strings_are_untouched() {
        let out = format_placeholders("./run.sh --fast", &Placeholders::new()).expect("format");
        assert_eq!(out, "./run.sh --fast");
    }

    #[test]
    fn replaces_every_named_field_once() {
        let out = format_placeholders("{mode}: echo {mod} {mod}", &map(&[("mod", "v2"), ("mode", "run")]))
            .expect("format");
        assert_eq!(out, "run: echo v2 v2");
    }

    #[test]
    fn replacement_text_is_not_rescanned() {
        let out = format_placeholders("{a}", &map(&[("a", "{b}"), ("b", "x")])).expect("format");
        assert_eq!(out, "{b}");
    }

    #[test]
    fn doubled_braces_are_literal() {
        let out = format_placeholders("awk '{{print $1}}' {f}", &map(&[("f", "in.txt")])).expect("format");
        assert_eq!(out, "awk '{print $1}' in.txt");
    }

    #[test]
    fn missing_name_is_unresolved() {
        let err = format_placeholders("test-{mod}", &Placeholders::new()).unwrap_err();
        assert_eq!(
            err,
            PlaceholderError::Unresolved {
                name: "mod".to_string()
            }
        );
    }

    #[test]
    fn stray_brace_is_unbalanced() {
        let err = format_placeholders("a}b", &Placeholders::new()).unwrap_err();
        assert_eq!(err, PlaceholderError::Unbalanced { position: 1 });
        let err = format_placeholders("{a}}", &map(&[("a", "x")])).unwrap_err();
        assert_eq!(err, PlaceholderError::Unbalanced { position: 3 });
    }

    #[test]
    fn top_level_scalar_failure_is_returned() {
        let result = substitute(&ParamValue::scalar("{missing}.log"), &Placeholders::new());
        assert!(matches!(result, Err(PlaceholderError::Unresolved { .. })));
    }

    #[test]
    fn mapping_failure_keeps_original_string() {
        let bag = ParamValue::Mapping(vec![
            entry("cmd", ParamValue::scalar("echo {mod}")),
            entry("dir", ParamValue::scalar("sub-{unknown}")),
        ]);
        let out = substitute(&bag, &map(&[("mod", "v2")])).expect("substitute");
        assert_eq!(out.get("cmd"), Some(&ParamValue::scalar("echo v2")));
        assert_eq!(out.get("dir"), Some(&ParamValue::scalar("sub-{unknown}")));
    }

    #[test]
    fn rewrites_one_container_level_deep() {
        let bag = ParamValue::Mapping(vec![
            entry("cmd", ParamValue::scalar("{mod}")),
            entry(
                "args",
                ParamValue::Sequence(vec![ParamValue::scalar("{mod}")]),
            ),
            entry(
                "env",
                ParamValue::Mapping(vec![entry("TAG", ParamValue::scalar("{mod}"))]),
            ),
            entry(
                "deep",
                ParamValue::Mapping(vec![entry(
                    "a",
                    ParamValue::Sequence(vec![ParamValue::scalar("{mod}")]),
                )]),
            ),
        ]);

        let out = substitute(&bag, &map(&[("mod", "v2")])).expect("substitute");

        assert_eq!(out.get("cmd"), Some(&ParamValue::scalar("v2")));
        assert_eq!(
            out.get("args"),
            Some(&ParamValue::Sequence(vec![ParamValue::scalar("v2")]))
        );
        assert_eq!(
            out.get("env").and_then(|env| env.get("TAG")),
            Some(&ParamValue::scalar("v2"))
        );
        assert_eq!(out.get("deep"), bag.get("deep"));
    }

    #[test]
    fn sequence_of_sequences_is_rewritten_one_level() {
        let list = ParamValue::Sequence(vec![
            ParamValue::scalar("{mod}"),
            ParamValue::Sequence(vec![
                ParamValue::scalar("{mod}"),
                ParamValue::Sequence(vec![ParamValue::scalar("{mod}")]),
            ]),
        ]);
        let out = substitute(&list, &map(&[("mod", "v2")])).expect("substitute");
        assert_eq!(
            out,
            ParamValue::Sequence(vec![
                ParamValue::scalar("v2"),
                ParamValue::Sequence(vec![
                    ParamValue::scalar("v2"),
                    ParamValue::Sequence(vec![ParamValue::scalar("{mod}")]),
                ]),
            ])
        );
    }
}
