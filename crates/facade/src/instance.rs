//! Process-wide default context.
//!
//! Resolved once: either explicitly through [`install`] at start-up, or on
//! first use of [`global`] from the process env with a JSON-lines logger
//! on stderr.

use autolog_adapters::{JsonLogger, StderrLogSink};
use autolog_app::{AutoLog, Event, LoggedAction, LoggedOperation};
use autolog_config::{AutoLogConfig, load_autolog_config_std_env};
use autolog_shared::{ErrorCode, ErrorEnvelope, Fields};
use std::sync::{Arc, OnceLock};

static DEFAULT: OnceLock<AutoLog> = OnceLock::new();

/// Install the process-wide default context.
///
/// Fails with `autolog:already_installed` once a default exists, including
/// one resolved implicitly by [`global`].
pub fn install(autolog: AutoLog) -> Result<(), ErrorEnvelope> {
    DEFAULT.set(autolog).map_err(|_| {
        ErrorEnvelope::expected(
            ErrorCode::already_installed(),
            "the default autolog context is already resolved",
        )
    })
}

/// The process-wide default context, resolving it on first use.
pub fn global() -> &'static AutoLog {
    DEFAULT.get_or_init(from_process_env)
}

/// Create an event on the default context.
#[must_use]
pub fn event(meta: Fields) -> Event {
    global().event(meta)
}

/// Wrap a function as an action on the default context.
#[must_use]
pub fn log_action<F>(name: impl Into<Arc<str>>, function: F) -> LoggedAction<F> {
    global().action(name, function)
}

/// Wrap a handler as an operation on the default context.
#[must_use]
pub fn log_operation<H>(name: impl Into<Arc<str>>, handler: H) -> LoggedOperation<H> {
    global().operation(name, handler)
}

fn from_process_env() -> AutoLog {
    let config = load_autolog_config_std_env().unwrap_or_else(|error| {
        tracing::warn!(
            code = %error.code,
            message = %error.message,
            "invalid autolog environment, falling back to defaults"
        );
        AutoLogConfig::default()
    });
    AutoLog::new(Arc::new(JsonLogger::new(Arc::new(StderrLogSink))), config)
}
