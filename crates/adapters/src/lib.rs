//! # autolog-adapters
//!
//! Adapter implementations for ports: record sinks (JSON lines, `tracing`,
//! in-memory) and buffered transport responses.
//! This crate depends on `ports`, `domain`, and `shared`.

pub mod log_sink;
pub mod logger;
pub mod memory;
pub mod response;
pub mod tracing_logger;

pub use log_sink::{BufferLogSink, LogSink, StderrLogSink};
pub use logger::{ENVELOPE_LEVEL, ENVELOPE_RECORD, ENVELOPE_TIMESTAMP, JsonLogger};
pub use memory::MemoryLogger;
pub use response::{CapturedResponse, FetchFailure};
#[cfg(feature = "reqwest")]
pub use response::{network_error_from_reqwest, send_checked};
pub use tracing_logger::TracingLogger;

/// Returns the adapters crate version.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
