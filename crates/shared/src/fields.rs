//! Metadata trimming for structured records.
//!
//! A record is an ordered mapping of string keys to JSON values. These helpers
//! never mutate their input: each returns a fresh mapping that keeps the
//! relative order of the surviving keys.

use serde_json::{Map, Value};

/// Ordered field mapping used for event contexts and emitted records.
pub type Fields = Map<String, Value>;

/// Returns true for values that must never reach a sink: `null` and `""`.
///
/// `undefined` has no JSON counterpart; absent optional values are encoded as
/// `null` before they reach a mapping.
#[must_use]
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        _ => false,
    }
}

/// Remove keys whose value is `null` or the empty string.
///
/// `0`, `false`, empty arrays and empty objects are kept.
#[must_use]
pub fn trim(fields: &Fields) -> Fields {
    fields
        .iter()
        .filter(|(_, value)| !is_empty_value(value))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Consuming variant of [`trim`].
#[must_use]
pub fn trim_owned(fields: Fields) -> Fields {
    fields
        .into_iter()
        .filter(|(_, value)| !is_empty_value(value))
        .collect()
}

/// Remove the named keys; names that are not present are ignored.
#[must_use]
pub fn remove_keys<S: AsRef<str>>(fields: &Fields, keys: &[S]) -> Fields {
    fields
        .iter()
        .filter(|(key, _)| !keys.iter().any(|muted| muted.as_ref() == key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Split a comma-separated field list into trimmed names.
///
/// Empty input yields an empty list; blank entries are dropped.
#[must_use]
pub fn field_list_from_csv(input: &str) -> Vec<Box<str>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(Box::from)
        .collect()
}

/// Merge `overlay` into `base` with spread semantics: later keys win but an
/// existing key keeps its original position.
pub fn merge_into(base: &mut Fields, overlay: Fields) {
    for (key, value) in overlay {
        base.insert(key, value);
    }
}
