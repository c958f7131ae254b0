//! Capability contracts for failure values.
//!
//! A wrapped function can fail with anything: a transport response, a
//! connection error, an exception, a plain object, or a bare primitive. The
//! classifier never asks what concrete type it holds; it asks which
//! capabilities the value exposes, in a fixed order. [`Throwable`] is that
//! capability set. Every method has a "not supported" default so an
//! implementation only declares the shapes it actually has.

use crate::BoxFuture;
use autolog_domain::{Exception, NetworkError};
use autolog_shared::{ErrorEnvelope, Fields};
use serde_json::Value;
use std::borrow::Cow;

/// Response capability: status, headers and a readable body.
pub trait FetchResponse: Send + Sync {
    /// HTTP-like status code.
    fn status(&self) -> u16;

    /// Whether the status is in the success range.
    fn ok(&self) -> bool {
        (200..300).contains(&self.status())
    }

    /// Header lookup; names are matched case-insensitively.
    fn header(&self, name: &str) -> Option<&str>;

    /// Read the raw body.
    fn body(&self) -> BoxFuture<'_, Result<Vec<u8>, ErrorEnvelope>>;
}

/// Exception shape: reserved fields plus custom own-fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ExceptionView<'a> {
    /// Exception name.
    pub name: Cow<'a, str>,
    /// Exception message.
    pub message: Cow<'a, str>,
    /// Error code, if any.
    pub code: Option<Value>,
    /// Stack text, if any.
    pub stack: Option<Cow<'a, str>>,
    /// Custom own-fields beyond the reserved ones.
    pub fields: Cow<'a, Fields>,
}

/// Connection failure shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkFailure<'a> {
    /// Failure message.
    pub message: &'a str,
    /// Transport error code, if any.
    pub code: Option<&'a str>,
}

/// Capability-based view over any failure value.
pub trait Throwable {
    /// No failure value was supplied.
    fn is_absent(&self) -> bool {
        false
    }

    /// The value is a transport response.
    fn as_response(&self) -> Option<&dyn FetchResponse> {
        None
    }

    /// The value is a transport connection failure.
    fn as_network_error(&self) -> Option<NetworkFailure<'_>> {
        None
    }

    /// The value behaves like an exception.
    fn as_exception(&self) -> Option<ExceptionView<'_>> {
        None
    }

    /// The value is a plain object.
    fn as_object(&self) -> Option<Cow<'_, Fields>> {
        None
    }

    /// Fallback representation for anything else.
    fn as_value(&self) -> Value {
        Value::Null
    }
}

impl Throwable for Value {
    fn is_absent(&self) -> bool {
        self.is_null()
    }

    fn as_object(&self) -> Option<Cow<'_, Fields>> {
        self.as_object().map(Cow::Borrowed)
    }

    fn as_value(&self) -> Value {
        self.clone()
    }
}

impl Throwable for str {
    fn as_value(&self) -> Value {
        Value::from(self)
    }
}

impl Throwable for String {
    fn as_value(&self) -> Value {
        Value::from(self.as_str())
    }
}

impl Throwable for Exception {
    fn as_exception(&self) -> Option<ExceptionView<'_>> {
        Some(ExceptionView {
            name: Cow::Borrowed(self.name()),
            message: Cow::Borrowed(self.message()),
            code: self.code().cloned(),
            stack: self.stack().map(Cow::Borrowed),
            fields: Cow::Borrowed(self.fields()),
        })
    }
}

impl Throwable for NetworkError {
    fn as_network_error(&self) -> Option<NetworkFailure<'_>> {
        Some(NetworkFailure {
            message: self.message(),
            code: self.code(),
        })
    }
}

impl Throwable for ErrorEnvelope {
    fn as_exception(&self) -> Option<ExceptionView<'_>> {
        let mut fields = Fields::new();
        fields.insert("kind".to_owned(), Value::from(self.kind.to_string()));
        fields.insert("class".to_owned(), Value::from(self.class.to_string()));
        if !self.metadata.is_empty() {
            let metadata = self
                .metadata
                .iter()
                .map(|(key, value)| (key.clone(), Value::from(value.as_str())))
                .collect();
            fields.insert("metadata".to_owned(), Value::Object(metadata));
        }
        Some(ExceptionView {
            name: Cow::Borrowed("ErrorEnvelope"),
            message: Cow::Borrowed(&self.message),
            code: Some(Value::from(self.code.to_string())),
            stack: None,
            fields: Cow::Owned(fields),
        })
    }
}

impl Throwable for std::io::Error {
    fn as_exception(&self) -> Option<ExceptionView<'_>> {
        Some(ExceptionView {
            name: Cow::Borrowed("Error"),
            message: Cow::Owned(self.to_string()),
            code: Some(Value::from(format!("{:?}", self.kind()))),
            stack: None,
            fields: Cow::Owned(Fields::new()),
        })
    }
}

impl<T: Throwable> Throwable for Option<T> {
    fn is_absent(&self) -> bool {
        self.as_ref().is_none_or(Throwable::is_absent)
    }

    fn as_response(&self) -> Option<&dyn FetchResponse> {
        self.as_ref().and_then(Throwable::as_response)
    }

    fn as_network_error(&self) -> Option<NetworkFailure<'_>> {
        self.as_ref().and_then(Throwable::as_network_error)
    }

    fn as_exception(&self) -> Option<ExceptionView<'_>> {
        self.as_ref().and_then(Throwable::as_exception)
    }

    fn as_object(&self) -> Option<Cow<'_, Fields>> {
        self.as_ref().and_then(Throwable::as_object)
    }

    fn as_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, Throwable::as_value)
    }
}

impl<T: Throwable + ?Sized> Throwable for &T {
    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }

    fn as_response(&self) -> Option<&dyn FetchResponse> {
        (**self).as_response()
    }

    fn as_network_error(&self) -> Option<NetworkFailure<'_>> {
        (**self).as_network_error()
    }

    fn as_exception(&self) -> Option<ExceptionView<'_>> {
        (**self).as_exception()
    }

    fn as_object(&self) -> Option<Cow<'_, Fields>> {
        (**self).as_object()
    }

    fn as_value(&self) -> Value {
        (**self).as_value()
    }
}

impl<T: Throwable + ?Sized> Throwable for Box<T> {
    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }

    fn as_response(&self) -> Option<&dyn FetchResponse> {
        (**self).as_response()
    }

    fn as_network_error(&self) -> Option<NetworkFailure<'_>> {
        (**self).as_network_error()
    }

    fn as_exception(&self) -> Option<ExceptionView<'_>> {
        (**self).as_exception()
    }

    fn as_object(&self) -> Option<Cow<'_, Fields>> {
        (**self).as_object()
    }

    fn as_value(&self) -> Value {
        (**self).as_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io;

    #[test]
    fn json_values_expose_absent_object_and_primitive_shapes() {
        assert!(Value::Null.is_absent());

        let object = json!({ "message": "bar" });
        assert!(!object.is_absent());
        assert!(Throwable::as_object(&object).is_some());
        assert!(object.as_exception().is_none());

        let primitive = json!("boom");
        assert!(Throwable::as_object(&primitive).is_none());
        assert_eq!(primitive.as_value(), json!("boom"));
    }

    #[test]
    fn envelope_is_an_exception_with_custom_fields() -> Result<(), Box<dyn std::error::Error>> {
        let envelope = ErrorEnvelope::invalid_argument("bad call").with_metadata("action", "get");
        let view = envelope.as_exception().ok_or("expected exception view")?;

        assert_eq!(view.message, "bad call");
        assert_eq!(view.code, Some(json!("autolog:invalid_argument")));
        assert_eq!(view.fields.get("kind"), Some(&json!("expected")));
        assert_eq!(view.fields.get("metadata"), Some(&json!({ "action": "get" })));
        Ok(())
    }

    #[test]
    fn io_error_is_an_unadorned_exception() -> Result<(), Box<dyn std::error::Error>> {
        let error = io::Error::new(io::ErrorKind::NotFound, "missing");
        let view = error.as_exception().ok_or("expected exception view")?;
        assert_eq!(view.code, Some(json!("NotFound")));
        assert!(view.fields.is_empty());
        Ok(())
    }

    #[test]
    fn option_none_is_absent_and_some_delegates() {
        let none: Option<NetworkError> = None;
        assert!(none.is_absent());

        let some = Some(NetworkError::new("refused").with_code("ECONNREFUSED"));
        assert!(!some.is_absent());
        let failure = some.as_network_error();
        assert_eq!(failure.map(|failure| failure.code), Some(Some("ECONNREFUSED")));
    }
}
