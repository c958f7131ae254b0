//! # autolog
//!
//! Structured-event logging for actions and request operations.
//!
//! Wrap a function with [`AutoLog::action`] or a request handler with
//! [`AutoLog::operation`]: every call emits a start record (verbose level)
//! and exactly one terminal record, with failures classified into a
//! category and a severity. Results and errors pass through unchanged.
//!
//! ```
//! use autolog::{AutoLog, AutoLogConfig, Fields, MemoryLogger};
//! use std::sync::Arc;
//!
//! let logger = Arc::new(MemoryLogger::new());
//! let autolog = AutoLog::new(logger.clone(), AutoLogConfig::default());
//! let add_one = autolog.action("addOne", |params: serde_json::Value, _meta: Fields| {
//!     let n = params.get("n").and_then(serde_json::Value::as_i64).unwrap_or(0);
//!     Ok::<_, autolog::Exception>(n + 1)
//! });
//!
//! let value = add_one.call_sync(serde_json::json!({ "n": 1 }), Fields::new());
//! assert_eq!(value.ok(), Some(2));
//! assert_eq!(logger.len(), 1);
//! ```
//!
//! This crate depends on `app`, `adapters`, `config`, `ports`, `domain`,
//! and `shared`.

pub mod instance;
pub mod telemetry;

/// Crate metadata.
pub mod placeholder {
    /// Returns the facade crate version.
    #[must_use]
    pub const fn facade_crate_version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

pub use autolog_adapters::{
    BufferLogSink, CapturedResponse, FetchFailure, JsonLogger, LogSink, MemoryLogger,
    StderrLogSink, TracingLogger,
};
#[cfg(feature = "reqwest")]
pub use autolog_adapters::{network_error_from_reqwest, send_checked};
pub use autolog_app::{
    AutoLog, CallError, Classified, Event, LoggedAction, LoggedOperation, assign_request_id,
    assign_transaction_id, classify, classify_now, request_id_middleware,
    transaction_id_middleware,
};
pub use autolog_config::{
    AutoLogConfig, AutoLogEnv, AutoLogLevel, EnvParseError, load_autolog_config_from_sources,
    load_autolog_config_std_env,
};
pub use autolog_domain::{Category, Exception, NetworkError, Outcome};
pub use autolog_ports::{
    FetchResponse, LogEvent, LogFields, LogLevel, LoggerPort, Next, OperationRequest,
    OperationResponse, Throwable,
};
pub use autolog_shared::{ErrorEnvelope, Fields, field_list_from_csv, remove_keys, trim};
pub use instance::{event, global, install, log_action, log_operation};
pub use placeholder::facade_crate_version;
pub use telemetry::{Profile, init_tracing};
