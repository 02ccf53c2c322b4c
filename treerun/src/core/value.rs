//! Parameter values attached to modes and placeholder maps.
//!
//! Config values are dynamically shaped (a mode's `args` is a list, its `cmd` a
//! string, arbitrary extra keys may nest). [`ParamValue`] is the closed set of
//! shapes the rest of the crate dispatches on.

/// A structured configuration value.
///
/// Mappings keep their declaration order so that output derived from them
/// (summaries, log files) is stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Scalar(String),
    Sequence(Vec<ParamValue>),
    Mapping(Vec<(String, ParamValue)>),
}

impl ParamValue {
    pub fn scalar(value: impl Into<String>) -> Self {
        ParamValue::Scalar(value.into())
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            ParamValue::Scalar(value) => Some(value),
            _ => None,
        }
    }

    /// Look up `key` when `self` is a mapping. The first matching entry wins.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        match self {
            ParamValue::Mapping(entries) => entries
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// Scalar members of a sequence, in order. Nested containers are skipped.
    pub fn scalar_items(&self) -> Vec<&str> {
        match self {
            ParamValue::Sequence(items) => items.iter().filter_map(ParamValue::as_scalar).collect(),
            ParamValue::Scalar(value) => vec![value.as_str()],
            ParamValue::Mapping(_) => Vec::new(),
        }
    }
}
