//! Canonical record keys and muting rules.

/// Key holding the operation name.
pub const FIELD_OPERATION: &str = "operation";
/// Key holding the action name.
pub const FIELD_ACTION: &str = "action";
/// Key holding the terminal outcome.
pub const FIELD_RESULT: &str = "result";
/// Key holding the failure category.
pub const FIELD_CATEGORY: &str = "category";
/// Key holding the failure message.
pub const FIELD_MESSAGE: &str = "message";
/// Key holding an HTTP-like status.
pub const FIELD_STATUS: &str = "status";
/// Key holding success data.
pub const FIELD_DATA: &str = "data";
/// Key holding personal data; never emitted.
pub const FIELD_USER: &str = "user";

/// Fields suppressed regardless of configuration.
pub const ALWAYS_MUTED: [&str; 3] = [FIELD_USER, "handler", "_locals"];

/// Fields that configuration can never suppress.
pub const UNMUTABLE: [&str; 4] = [FIELD_OPERATION, FIELD_ACTION, FIELD_CATEGORY, FIELD_RESULT];

/// Resolve the effective muted list: configured names plus [`ALWAYS_MUTED`],
/// minus anything in [`UNMUTABLE`]. Duplicates are dropped.
#[must_use]
pub fn effective_muted_fields<S: AsRef<str>>(configured: &[S]) -> Vec<Box<str>> {
    let mut muted: Vec<Box<str>> = Vec::with_capacity(configured.len() + ALWAYS_MUTED.len());
    let candidates = configured
        .iter()
        .map(AsRef::as_ref)
        .chain(ALWAYS_MUTED.iter().copied());
    for name in candidates {
        if UNMUTABLE.contains(&name) || muted.iter().any(|existing| &**existing == name) {
            continue;
        }
        muted.push(Box::from(name));
    }
    muted
}
