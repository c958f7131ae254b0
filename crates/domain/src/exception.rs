//! Exception-like failure values.
//!
//! [`Exception`] models a language exception: the reserved fields `name`,
//! `message`, `code` and `stack`, plus any custom own-fields an application
//! attaches. An exception with no custom fields is an unadorned system
//! failure; one with custom fields is an application failure.
//!
//! [`NetworkError`] models a transport connection failure raised before any
//! response was received.

use autolog_shared::Fields;
use serde_json::Value;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;

/// Default exception name.
pub const DEFAULT_EXCEPTION_NAME: &str = "Error";

/// An exception with reserved fields and custom own-fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Exception {
    name: Box<str>,
    message: Box<str>,
    code: Option<Value>,
    stack: Option<Box<str>>,
    fields: Fields,
}

impl Exception {
    /// Create a plain exception with the default name.
    pub fn new(message: impl Into<Box<str>>) -> Self {
        Self::named(DEFAULT_EXCEPTION_NAME, message)
    }

    /// Create an exception with an explicit name (e.g. `TypeError`).
    pub fn named(name: impl Into<Box<str>>, message: impl Into<Box<str>>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            code: None,
            stack: None,
            fields: Fields::new(),
        }
    }

    /// Build an exception from any error, keeping its message and source chain.
    ///
    /// The chain of `source()` messages becomes the stack text so the record
    /// still shows where the failure came from.
    pub fn from_error(error: &(dyn std::error::Error + 'static)) -> Self {
        let mut exception = Self::new(error.to_string());
        let mut chain = Vec::new();
        let mut current = error.source();
        while let Some(source) = current {
            chain.push(format!("caused by: {source}"));
            current = source.source();
        }
        if !chain.is_empty() {
            exception.stack = Some(chain.join("\n").into_boxed_str());
        }
        exception
    }

    /// Attach an error code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<Value>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Attach stack text verbatim.
    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<Box<str>>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Capture the current backtrace as stack text.
    ///
    /// Honors `RUST_BACKTRACE`; nothing is attached when capture is disabled.
    #[must_use]
    pub fn with_backtrace(mut self) -> Self {
        let backtrace = Backtrace::capture();
        if backtrace.status() == BacktraceStatus::Captured {
            self.stack = Some(backtrace.to_string().into_boxed_str());
        }
        self
    }

    /// Attach a custom own-field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Exception name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Exception message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Error code, if any.
    #[must_use]
    pub const fn code(&self) -> Option<&Value> {
        self.code.as_ref()
    }

    /// Stack text, if any.
    #[must_use]
    pub fn stack(&self) -> Option<&str> {
        self.stack.as_deref()
    }

    /// Custom own-fields (everything except the reserved fields).
    #[must_use]
    pub const fn fields(&self) -> &Fields {
        &self.fields
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}: {}", self.name, self.message)
    }
}

impl std::error::Error for Exception {}

/// A transport connection failure (DNS, refused connection, timeout).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkError {
    message: Box<str>,
    code: Option<Box<str>>,
}

impl NetworkError {
    /// Create a network error.
    pub fn new(message: impl Into<Box<str>>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    /// Attach a transport error code (e.g. `ENOTFOUND`).
    #[must_use]
    pub fn with_code(mut self, code: impl Into<Box<str>>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Transport error code, if any.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(formatter, "{} ({code})", self.message),
            None => formatter.write_str(&self.message),
        }
    }
}

impl std::error::Error for NetworkError {}
