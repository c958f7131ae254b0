//! Structured logging boundary contract.

use autolog_shared::Fields;
use std::fmt;

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    /// Info.
    Info,
    /// Warn.
    Warn,
    /// Error.
    Error,
}

impl LogLevel {
    /// Lowercase level name as written by JSON sinks.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// One structured record, ordered as it was built.
pub type LogFields = Fields;

/// Structured log event: a severity and the record to emit at it.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEvent {
    /// Severity.
    pub level: LogLevel,
    /// Record fields (already trimmed and muted).
    pub fields: LogFields,
}

impl LogEvent {
    /// Build an event.
    #[must_use]
    pub const fn new(level: LogLevel, fields: LogFields) -> Self {
        Self { level, fields }
    }
}

/// Boundary contract for the record sink.
///
/// Implementations must not swallow their own failures silently; a panic in
/// `log` propagates to the wrapped call that triggered the emission.
pub trait LoggerPort: Send + Sync {
    /// Emit a structured event.
    fn log(&self, event: LogEvent);

    /// Convenience: info record.
    fn info(&self, record: LogFields) {
        self.log(LogEvent::new(LogLevel::Info, record));
    }

    /// Convenience: warn record.
    fn warn(&self, record: LogFields) {
        self.log(LogEvent::new(LogLevel::Warn, record));
    }

    /// Convenience: error record.
    fn error(&self, record: LogFields) {
        self.log(LogEvent::new(LogLevel::Error, record));
    }
}
