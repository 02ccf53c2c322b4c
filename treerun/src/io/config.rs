//! Tree configuration loaded from YAML (`tree.yaml` by default).
//!
//! ```yaml
//! Root: ../data            # optional, relative to the working directory
//! Handles:                 # optional (alias: Placeholders)
//!   sample: s1
//! Tree:
//!   First level: [dir1, dir2]
//!   Second level: [subdir1, subdir2]
//! Modes:
//!   Mode 1:
//!     cmd: ./run.sh
//!   Mode 2:
//!     cmd: ./run.sh {sample}
//!     dir: test-{mod}
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::core::placeholder::{PlaceholderError, Placeholders};
use crate::core::types::{Level, LevelSpec, ModeEntry};
use crate::core::value::ParamValue;
use crate::error::Halt;

/// Raw document shape. Block names are capitalized in the file.
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(rename = "Tree")]
    tree: Option<Mapping>,
    #[serde(rename = "Modes")]
    modes: Option<Mapping>,
    #[serde(rename = "Root")]
    root: Option<PathBuf>,
    #[serde(rename = "Handles")]
    handles: Option<Mapping>,
    #[serde(rename = "Placeholders")]
    placeholders: Option<Mapping>,
}

/// Validated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeConfig {
    /// Directory the tree paths are resolved against.
    pub root: PathBuf,
    pub levels: LevelSpec,
    pub modes: Vec<ModeEntry>,
    /// Default placeholder values from `Handles`/`Placeholders`.
    pub handles: Placeholders,
}

impl TreeConfig {
    /// Placeholder map for a run of `mode`.
    ///
    /// Config handles come first, then `mode`, then `mod` from the command line,
    /// which overrides any configured value.
    pub fn placeholders(&self, modifier: Option<&str>, mode: &str) -> Placeholders {
        let mut map = self.handles.clone();
        map.insert("mode".to_string(), mode.to_string());
        if let Some(modifier) = modifier {
            map.insert("mod".to_string(), modifier.to_string());
        }
        map
    }
}

/// Load and validate the configuration at `path`.
///
/// Any problem reading or interpreting the file is a [`Halt::InvalidConfig`];
/// a non-scalar handle value is a [`Halt::Placeholder`].
pub fn load_config(path: &Path) -> Result<TreeConfig> {
    let contents = fs::read_to_string(path)
        .map_err(|err| Halt::invalid_config(path, format!("read failed: {err}")))?;
    let base_dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let base_dir = std::path::absolute(base_dir)
        .map_err(|err| Halt::invalid_config(path, format!("resolve directory: {err}")))?;
    let config = parse_config(&contents, &base_dir).map_err(|err| match err {
        ParseError::Invalid(reason) => Halt::invalid_config(path, reason),
        ParseError::Handle { name, source } => Halt::Placeholder {
            context: format!("handle '{name}'"),
            source,
        },
    })?;
    debug!(
        path = %path.display(),
        root = %config.root.display(),
        levels = config.levels.len(),
        modes = config.modes.len(),
        "loaded config"
    );
    Ok(config)
}

#[derive(Debug)]
enum ParseError {
    Invalid(String),
    Handle {
        name: String,
        source: PlaceholderError,
    },
}

fn invalid(reason: impl Into<String>) -> ParseError {
    ParseError::Invalid(reason.into())
}

/// Parse config text.
///
/// A missing `Root` defaults to `base_dir`; a relative one resolves against
/// the current working directory.
fn parse_config(contents: &str, base_dir: &Path) -> Result<TreeConfig, ParseError> {
    let raw: RawConfig =
        serde_yaml::from_str(contents).map_err(|err| invalid(format!("parse failed: {err}")))?;

    let tree = raw.tree.ok_or_else(|| invalid("missing 'Tree' block"))?;
    let modes = raw.modes.ok_or_else(|| invalid("missing 'Modes' block"))?;

    let levels = tree
        .into_iter()
        .map(|(name, dirs)| parse_level(name, dirs))
        .collect::<Result<LevelSpec, _>>()?;

    let modes = modes
        .into_iter()
        .map(|(name, params)| {
            let name = scalar_key(&name)?;
            let params = param_value(params)?;
            if !matches!(params, ParamValue::Mapping(_)) {
                return Err(invalid(format!("mode '{name}' must be a mapping")));
            }
            Ok(ModeEntry { name, params })
        })
        .collect::<Result<Vec<_>, _>>()?;
    if modes.is_empty() {
        return Err(invalid("'Modes' block has no entries"));
    }

    let handles = match raw.handles.or(raw.placeholders) {
        Some(handles) => parse_handles(handles)?,
        None => Placeholders::new(),
    };

    let root = match raw.root {
        Some(root) if root.is_absolute() => root,
        Some(root) => std::path::absolute(&root).map_err(|err| {
            invalid(format!("resolve 'Root' {}: {err}", root.display()))
        })?,
        None => base_dir.to_path_buf(),
    };

    Ok(TreeConfig {
        root,
        levels,
        modes,
        handles,
    })
}

fn parse_level(name: Value, dirs: Value) -> Result<Level, ParseError> {
    let name = scalar_key(&name)?;
    let Value::Sequence(items) = dirs else {
        return Err(invalid(format!(
            "level '{name}' must be a list of directory names"
        )));
    };
    let dirs = items
        .iter()
        .map(|item| {
            scalar_text(item)
                .ok_or_else(|| invalid(format!("level '{name}' contains a non-scalar entry")))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Level { name, dirs })
}

fn parse_handles(handles: Mapping) -> Result<Placeholders, ParseError> {
    handles
        .into_iter()
        .map(|(name, value)| {
            let name = scalar_key(&name)?;
            match scalar_text(&value) {
                Some(text) => Ok((name, text)),
                None => Err(ParseError::Handle {
                    source: PlaceholderError::NonScalar { name: name.clone() },
                    name,
                }),
            }
        })
        .collect()
}

fn scalar_key(key: &Value) -> Result<String, ParseError> {
    scalar_text(key).ok_or_else(|| invalid("mapping keys must be scalars"))
}

/// Render a YAML scalar as text. `null` is the empty string.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null => Some(String::new()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

fn param_value(value: Value) -> Result<ParamValue, ParseError> {
    match value {
        Value::Sequence(items) => items
            .into_iter()
            .map(param_value)
            .collect::<Result<Vec<_>, _>>()
            .map(ParamValue::Sequence),
        Value::Mapping(entries) => entries
            .into_iter()
            .map(|(key, item)| Ok((scalar_key(&key)?, param_value(item)?)))
            .collect::<Result<Vec<_>, _>>()
            .map(ParamValue::Mapping),
        Value::Tagged(tagged) => param_value(tagged.value),
        scalar => Ok(ParamValue::Scalar(scalar_text(&scalar).unwrap_or_default())),
    }
}
