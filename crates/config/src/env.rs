//! Environment variable parsing and env-to-config merging.
//!
//! This module keeps env parsing:
//! - strict (invalid values fail fast)
//! - deterministic (CSV lists are trimmed and blank entries dropped)

use crate::schema::{AutoLogConfig, AutoLogLevel};
use autolog_shared::{ErrorCode, ErrorEnvelope, field_list_from_csv};
use std::collections::BTreeMap;
use std::fmt;

/// Env var: comma-separated field names to suppress.
pub const ENV_LOGGER_MUTE_FIELDS: &str = "LOGGER_MUTE_FIELDS";
/// Env var: verbosity level (`verbose` | `standard` | `concise` | `error`).
pub const ENV_AUTO_LOG_LEVEL: &str = "AUTO_LOG_LEVEL";

/// Typed env overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutoLogEnv {
    /// Parsed `LOGGER_MUTE_FIELDS`.
    pub mute_fields: Option<Vec<Box<str>>>,
    /// Parsed `AUTO_LOG_LEVEL`.
    pub level: Option<AutoLogLevel>,
}

impl AutoLogEnv {
    /// Parse env overrides from a key/value map (useful for tests and fixtures).
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        Ok(Self {
            mute_fields: map
                .get(ENV_LOGGER_MUTE_FIELDS)
                .map(|raw| field_list_from_csv(raw)),
            level: parse_optional_level(map, ENV_AUTO_LOG_LEVEL)?,
        })
    }

    /// Parse env overrides from the current process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let mut map = BTreeMap::new();
        for name in [ENV_LOGGER_MUTE_FIELDS, ENV_AUTO_LOG_LEVEL] {
            if let Ok(value) = std::env::var(name) {
                map.insert(name.to_string(), value);
            }
        }

        Self::from_map(&map)
    }
}

/// Apply env overrides to a base config (env wins over file/default values).
#[must_use]
pub fn apply_env_overrides(base: AutoLogConfig, env: &AutoLogEnv) -> AutoLogConfig {
    let mut config = base;
    if let Some(fields) = &env.mute_fields {
        config.mute_fields.clone_from(fields);
    }
    if let Some(level) = env.level {
        config.level = level;
    }
    config
}

/// Errors raised while parsing env vars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvParseError {
    /// An env var was present but empty after trimming.
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// Enum env var had an invalid value.
    InvalidEnum {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
}

impl EnvParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyValue { .. } => ErrorCode::new("config", "empty_env_var"),
            Self::InvalidEnum { .. } => ErrorCode::new("config", "invalid_env_enum"),
        }
    }
}

impl fmt::Display for EnvParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyValue { var } => write!(formatter, "{var} must be non-empty"),
            Self::InvalidEnum { var, .. } => write!(formatter, "{var} has an unsupported value"),
        }
    }
}

impl std::error::Error for EnvParseError {}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            EnvParseError::EmptyValue { var } => envelope.with_metadata("env_var", var),
            EnvParseError::InvalidEnum { var, value } => envelope
                .with_metadata("env_var", var)
                .with_metadata("value", value),
        }
    }
}

fn parse_optional_level(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<AutoLogLevel>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    if raw.trim().is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    raw.parse::<AutoLogLevel>()
        .map(Some)
        .map_err(|_| EnvParseError::InvalidEnum {
            var,
            value: raw.clone(),
        })
}
