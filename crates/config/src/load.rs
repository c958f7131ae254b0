//! Config loading helpers (file + env).

use crate::env::{AutoLogEnv, apply_env_overrides};
use crate::schema::{AutoLogConfig, parse_autolog_config_json};
use autolog_shared::ErrorEnvelope;
use std::collections::BTreeMap;

/// Build a config from an optional JSON document and an env map.
///
/// Env values win over the document; the document wins over defaults.
pub fn load_autolog_config_from_sources(
    json: Option<&str>,
    env_map: &BTreeMap<String, String>,
) -> Result<AutoLogConfig, ErrorEnvelope> {
    let base = match json {
        Some(input) => parse_autolog_config_json(input)?,
        None => AutoLogConfig::default(),
    };
    let env = AutoLogEnv::from_map(env_map)?;
    let config = apply_env_overrides(base, &env);

    tracing::debug!(
        level = %config.level,
        mute_fields = config.mute_fields.len(),
        "autolog config resolved"
    );
    Ok(config)
}

/// Build a config from the current process environment.
pub fn load_autolog_config_std_env() -> Result<AutoLogConfig, ErrorEnvelope> {
    let env = AutoLogEnv::from_std_env()?;
    let config = apply_env_overrides(AutoLogConfig::default(), &env);
    tracing::debug!(level = %config.level, "autolog config resolved from process env");
    Ok(config)
}
