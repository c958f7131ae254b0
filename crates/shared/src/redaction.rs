//! Secret detection and redaction for structured records.
//!
//! Muting removes a field entirely; redaction keeps the key but replaces the
//! value. Redaction is applied by sinks right before a record is encoded.

use crate::fields::Fields;
use serde_json::Value;

/// The redacted placeholder string.
pub const REDACTED: &str = "[REDACTED]";

/// Name segments that mark a field as holding a secret.
const SECRET_SEGMENTS: &[&str] = &[
    "key",
    "apikey",
    "token",
    "secret",
    "password",
    "passwd",
    "credential",
    "credentials",
    "authorization",
    "auth",
];

/// Checks if a key likely refers to a secret.
///
/// The key is split into lowercase segments on `_`, `-`, `.` and camelCase
/// boundaries; it is secret when any whole segment is a secret word. Words
/// that merely contain one (`author`, `keywords`) are not secret.
///
/// # Examples
///
/// ```
/// use autolog_shared::is_secret_key;
///
/// assert!(is_secret_key("apiKey"));
/// assert!(is_secret_key("password"));
/// assert!(is_secret_key("Authorization"));
/// assert!(!is_secret_key("transactionId"));
/// assert!(!is_secret_key("author"));
/// ```
pub fn is_secret_key(key: &str) -> bool {
    name_segments(key)
        .iter()
        .any(|segment| SECRET_SEGMENTS.contains(&segment.as_str()))
}

fn name_segments(key: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut previous_upper = false;
    let mut chars = key.chars().peekable();
    while let Some(ch) = chars.next() {
        if !ch.is_alphanumeric() {
            if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
            previous_upper = false;
            continue;
        }
        let upper = ch.is_uppercase();
        if upper && !current.is_empty() {
            let next_is_lower = chars.peek().is_some_and(|next| next.is_lowercase());
            // `fooBar` and the `K` in `APIKey` both start a new segment.
            if !previous_upper || next_is_lower {
                segments.push(std::mem::take(&mut current));
            }
        }
        current.extend(ch.to_lowercase());
        previous_upper = upper;
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Redact every value stored under a secret-looking key, recursively.
pub fn redact_fields(fields: &mut Fields) {
    for (key, value) in fields.iter_mut() {
        if is_secret_key(key) {
            *value = Value::String(REDACTED.to_string());
        } else {
            redact_value(value);
        }
    }
}

/// Redact nested objects and arrays inside a value.
pub fn redact_value(value: &mut Value) {
    match value {
        Value::Object(map) => redact_fields(map),
        Value::Array(items) => {
            for item in items {
                redact_value(item);
            }
        },
        _ => {},
    }
}
