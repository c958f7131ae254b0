//! Integration tests for env parsing and env-to-config merging.

use autolog_config::{
    AutoLogLevel, ENV_AUTO_LOG_LEVEL, ENV_LOGGER_MUTE_FIELDS, load_autolog_config_from_sources,
};
use autolog_shared::ErrorCode;
use std::collections::BTreeMap;
use std::error::Error;

fn env_map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
        .collect()
}

#[test]
fn env_overrides_win_over_json_document() -> Result<(), Box<dyn Error>> {
    let document = r#"{ "muteFields": ["ip"], "level": "verbose" }"#;
    let env = env_map(&[
        (ENV_LOGGER_MUTE_FIELDS, " email , stack,, "),
        (ENV_AUTO_LOG_LEVEL, "Concise"),
    ]);

    let config = load_autolog_config_from_sources(Some(document), &env)?;

    assert_eq!(config.level, AutoLogLevel::Concise);
    let fields: Vec<&str> = config.mute_fields.iter().map(AsRef::as_ref).collect();
    assert_eq!(fields, vec!["email", "stack"]);
    Ok(())
}

#[test]
fn document_applies_when_env_is_silent() -> Result<(), Box<dyn Error>> {
    let config = load_autolog_config_from_sources(
        Some(r#"{ "muteFields": ["ip"] }"#),
        &BTreeMap::new(),
    )?;
    assert_eq!(config.level, AutoLogLevel::Standard);
    let muted = config.muted_fields();
    let muted: Vec<&str> = muted.iter().map(AsRef::as_ref).collect();
    assert_eq!(muted, vec!["ip", "user", "handler", "_locals"]);
    Ok(())
}

#[test]
fn unsupported_level_fails_with_config_code() -> Result<(), Box<dyn Error>> {
    let env = env_map(&[(ENV_AUTO_LOG_LEVEL, "debug")]);
    let Err(error) = load_autolog_config_from_sources(None, &env) else {
        return Err("expected invalid level to fail".into());
    };
    assert_eq!(error.code, ErrorCode::new("config", "invalid_env_enum"));
    Ok(())
}
