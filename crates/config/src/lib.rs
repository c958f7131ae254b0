//! # autolog-config
//!
//! Env parsing and the explicit configuration handed to an `AutoLog`
//! context. This crate depends on `domain` and `shared` only.

/// Environment variable parsing and merging.
pub mod env;
/// Config loading helpers (file + env).
pub mod load;
/// Configuration schema types and helpers.
pub mod schema;

pub use env::{
    AutoLogEnv, ENV_AUTO_LOG_LEVEL, ENV_LOGGER_MUTE_FIELDS, EnvParseError, apply_env_overrides,
};
pub use load::{load_autolog_config_from_sources, load_autolog_config_std_env};
pub use schema::{AutoLogConfig, AutoLogLevel, UnknownLevel, parse_autolog_config_json};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
