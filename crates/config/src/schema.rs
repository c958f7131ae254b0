//! Configuration schema types and helpers.

use autolog_domain::effective_muted_fields;
use autolog_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Verbosity level selecting which records the wrappers emit.
///
/// | level | op start | op success | action start | action success | action failure | action params |
/// |---|---|---|---|---|---|---|
/// | verbose | yes | yes | yes | yes | yes | yes |
/// | standard | no | yes | no | yes | yes | yes |
/// | concise | no | yes | no | no | no | no |
/// | error | no | no | no | no | no | no |
///
/// Operation failures are emitted at every level.
///
/// Actions and operations share the `standard` default, so an operation's
/// start record only appears once `verbose` is selected. This differs from
/// loggers that default operations to `verbose`; hosts that want the start
/// record set `AUTO_LOG_LEVEL=verbose`.
///
/// ```
/// use autolog_config::AutoLogLevel;
///
/// assert_eq!(AutoLogLevel::default(), AutoLogLevel::Standard);
/// assert!(!AutoLogLevel::default().logs_operation_start());
/// assert!(AutoLogLevel::Verbose.logs_operation_start());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoLogLevel {
    /// Every start, success and failure.
    Verbose,
    /// Terminal records only.
    #[default]
    Standard,
    /// Operation terminals only; action params are left out of the context.
    Concise,
    /// Operation failures only.
    Error,
}

impl AutoLogLevel {
    /// Stable name as accepted by `AUTO_LOG_LEVEL`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Verbose => "verbose",
            Self::Standard => "standard",
            Self::Concise => "concise",
            Self::Error => "error",
        }
    }

    /// Whether an operation logs its start record.
    #[must_use]
    pub const fn logs_operation_start(self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Whether an operation logs its success record.
    #[must_use]
    pub const fn logs_operation_success(self) -> bool {
        !matches!(self, Self::Error)
    }

    /// Whether an action logs its start record.
    #[must_use]
    pub const fn logs_action_start(self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Whether an action logs its terminal records.
    #[must_use]
    pub const fn logs_action_outcome(self) -> bool {
        matches!(self, Self::Verbose | Self::Standard)
    }

    /// Whether action params are merged into the action context.
    #[must_use]
    pub const fn includes_action_params(self) -> bool {
        matches!(self, Self::Verbose | Self::Standard)
    }
}

impl fmt::Display for AutoLogLevel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Unknown verbosity level name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLevel {
    /// Raw input value.
    pub input: String,
}

impl fmt::Display for UnknownLevel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "unknown log level `{}` (expected verbose, standard, concise or error)",
            self.input
        )
    }
}

impl std::error::Error for UnknownLevel {}

impl FromStr for AutoLogLevel {
    type Err = UnknownLevel;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "verbose" => Ok(Self::Verbose),
            "standard" => Ok(Self::Standard),
            "concise" => Ok(Self::Concise),
            "error" => Ok(Self::Error),
            _ => Err(UnknownLevel {
                input: input.to_owned(),
            }),
        }
    }
}

/// Explicit configuration handed to an `AutoLog` context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct AutoLogConfig {
    /// Additional field names to suppress.
    pub mute_fields: Vec<Box<str>>,
    /// Verbosity level.
    pub level: AutoLogLevel,
}

impl AutoLogConfig {
    /// Replace the mute list.
    #[must_use]
    pub fn with_mute_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Box<str>>,
    {
        self.mute_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the verbosity level.
    #[must_use]
    pub const fn with_level(mut self, level: AutoLogLevel) -> Self {
        self.level = level;
        self
    }

    /// Field names removed from every record: configured names plus the
    /// always-muted set, minus the unmutable core fields.
    #[must_use]
    pub fn muted_fields(&self) -> Vec<Box<str>> {
        effective_muted_fields(&self.mute_fields)
    }
}

/// Parse a config from a JSON string.
pub fn parse_autolog_config_json(input: &str) -> Result<AutoLogConfig, ErrorEnvelope> {
    serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_json"),
            format!("invalid config JSON: {error}"),
        )
    })
}
