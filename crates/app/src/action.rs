//! Action wrapper: logs one call of a single-step function.

use crate::context::AutoLog;
use crate::event::Event;
use autolog_domain::FIELD_ACTION;
use autolog_ports::Throwable;
use autolog_shared::{ErrorEnvelope, Fields, merge_into};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Most positional arguments a wrapped call accepts: `params`, then `meta`.
pub const MAX_POSITIONAL_ARGS: usize = 2;

/// Error returned by a wrapped action or operation.
///
/// The wrapped function's own error is always handed back by value, never
/// replaced. [`CallError::into_inner`] recovers it.
#[derive(Debug)]
pub enum CallError<E> {
    /// Malformed call; nothing was invoked or logged.
    InvalidArgument(ErrorEnvelope),
    /// The wrapped function failed and the failure was logged.
    Failed(E),
    /// The wrapped function failed and formatting that failure failed too.
    Unclassified {
        /// Original error from the wrapped function.
        error: E,
        /// Classification failure raised while formatting `error`.
        cause: ErrorEnvelope,
    },
}

impl<E> CallError<E> {
    /// Original error of the wrapped function, if it was invoked and failed.
    pub fn into_inner(self) -> Option<E> {
        match self {
            Self::InvalidArgument(_) => None,
            Self::Failed(error) | Self::Unclassified { error, .. } => Some(error),
        }
    }

    /// Borrow the original error of the wrapped function.
    pub const fn inner(&self) -> Option<&E> {
        match self {
            Self::InvalidArgument(_) => None,
            Self::Failed(error) | Self::Unclassified { error, .. } => Some(error),
        }
    }

    /// Whether the call was rejected before invocation.
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Classification failure, if formatting the original error failed.
    pub const fn classification_failure(&self) -> Option<&ErrorEnvelope> {
        match self {
            Self::Unclassified { cause, .. } => Some(cause),
            Self::InvalidArgument(_) | Self::Failed(_) => None,
        }
    }
}

impl<E: fmt::Display> fmt::Display for CallError<E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(envelope) => fmt::Display::fmt(envelope, formatter),
            Self::Failed(error) => fmt::Display::fmt(error, formatter),
            Self::Unclassified { error, cause } => {
                write!(formatter, "{error} (logging the failure failed: {cause})")
            }
        }
    }
}

impl<E> std::error::Error for CallError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidArgument(_) => None,
            Self::Failed(error) => error.source(),
            Self::Unclassified { cause, .. } => Some(cause),
        }
    }
}

/// Function wrapped under an explicit action name.
///
/// Each call builds the context `{...meta, action: name, ...params}`,
/// invokes the function with the original `params` and `meta`, and emits
/// the records the configured level selects. Results and errors pass
/// through unchanged.
#[derive(Clone)]
pub struct LoggedAction<F> {
    name: Arc<str>,
    autolog: AutoLog,
    function: F,
}

impl<F> LoggedAction<F> {
    /// Wrap `function` under `name`.
    #[must_use]
    pub fn new(autolog: AutoLog, name: impl Into<Arc<str>>, function: F) -> Self {
        Self {
            name: name.into(),
            autolog,
            function,
        }
    }

    /// Name recorded as the `action` field.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unwrap the original function.
    pub fn into_inner(self) -> F {
        self.function
    }

    fn event(&self, meta: &Fields, params: Fields) -> Event {
        let mut context = meta.clone();
        context.insert(FIELD_ACTION.to_owned(), Value::from(self.name.as_ref()));
        if self.autolog.level().includes_action_params() {
            merge_into(&mut context, params);
        }
        self.autolog.event(context)
    }
}

impl<F> LoggedAction<F> {
    /// Invoke an async function and log its outcome.
    pub async fn call<P, T, E>(&self, params: P, meta: Fields) -> Result<T, CallError<E>>
    where
        F: AsyncFn(P, Fields) -> Result<T, E>,
        P: Serialize,
        E: Throwable,
    {
        let params_fields = params_to_fields(&params).map_err(CallError::InvalidArgument)?;
        let level = self.autolog.level();
        let event = self.event(&meta, params_fields);
        if level.logs_action_start() {
            event.start();
        }

        match (self.function)(params, meta).await {
            Ok(value) => {
                if level.logs_action_outcome() {
                    event.success(None);
                }
                Ok(value)
            }
            Err(error) => {
                if !level.logs_action_outcome() {
                    return Err(CallError::Failed(error));
                }
                match event.failure(&error).await {
                    Ok(()) => Err(CallError::Failed(error)),
                    Err(cause) => Err(unclassified(&self.name, error, cause)),
                }
            }
        }
    }

    /// Invoke with a positional argument list, validated at runtime.
    ///
    /// At most two arguments are accepted. The first is `params`, the second
    /// `meta`; each must be an object (or null) when present.
    pub async fn call_values<P, T, E>(&self, args: Vec<Value>) -> Result<T, CallError<E>>
    where
        F: AsyncFn(P, Fields) -> Result<T, E>,
        P: Serialize + DeserializeOwned,
        E: Throwable,
    {
        let (params, meta) = positional_args(args).map_err(CallError::InvalidArgument)?;
        let params = serde_json::from_value::<P>(Value::Object(params)).map_err(|error| {
            CallError::InvalidArgument(
                ErrorEnvelope::invalid_argument(format!("action params do not match: {error}"))
                    .with_metadata("action", self.name.as_ref()),
            )
        })?;
        self.call(params, meta).await
    }
}

impl<F> LoggedAction<F> {
    /// Invoke a plain function and log its outcome.
    ///
    /// Response failures must have their body buffered, since nothing here
    /// can await it.
    pub fn call_sync<P, T, E>(&self, params: P, meta: Fields) -> Result<T, CallError<E>>
    where
        F: Fn(P, Fields) -> Result<T, E>,
        P: Serialize,
        E: Throwable,
    {
        let params_fields = params_to_fields(&params).map_err(CallError::InvalidArgument)?;
        let level = self.autolog.level();
        let event = self.event(&meta, params_fields);
        if level.logs_action_start() {
            event.start();
        }

        match (self.function)(params, meta) {
            Ok(value) => {
                if level.logs_action_outcome() {
                    event.success(None);
                }
                Ok(value)
            }
            Err(error) => {
                if !level.logs_action_outcome() {
                    return Err(CallError::Failed(error));
                }
                match event.failure_now(&error) {
                    Ok(()) => Err(CallError::Failed(error)),
                    Err(cause) => Err(unclassified(&self.name, error, cause)),
                }
            }
        }
    }
}

impl<F> fmt::Debug for LoggedAction<F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LoggedAction")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

fn unclassified<E>(name: &str, error: E, cause: ErrorEnvelope) -> CallError<E> {
    tracing::warn!(action = name, code = %cause.code, "failed to classify action failure");
    CallError::Unclassified { error, cause }
}

fn params_to_fields<P: Serialize>(params: &P) -> Result<Fields, ErrorEnvelope> {
    let value = serde_json::to_value(params).map_err(|error| {
        ErrorEnvelope::invalid_argument(format!("action params are not serializable: {error}"))
    })?;
    match value {
        Value::Object(fields) => Ok(fields),
        Value::Null => Ok(Fields::new()),
        other => Err(ErrorEnvelope::invalid_argument("action params must be an object")
            .with_metadata("type", value_type(&other))),
    }
}

pub(crate) fn positional_args(args: Vec<Value>) -> Result<(Fields, Fields), ErrorEnvelope> {
    if args.len() > MAX_POSITIONAL_ARGS {
        return Err(ErrorEnvelope::invalid_argument(format!(
            "expected at most {MAX_POSITIONAL_ARGS} arguments (params, meta), got {}",
            args.len()
        )));
    }

    let mut args = args.into_iter();
    let params = object_arg(args.next(), "params")?;
    let meta = object_arg(args.next(), "meta")?;
    Ok((params, meta))
}

fn object_arg(arg: Option<Value>, position: &'static str) -> Result<Fields, ErrorEnvelope> {
    match arg {
        None | Some(Value::Null) => Ok(Fields::new()),
        Some(Value::Object(fields)) => Ok(fields),
        Some(other) => Err(
            ErrorEnvelope::invalid_argument(format!("{position} must be an object"))
                .with_metadata("type", value_type(&other)),
        ),
    }
}

const fn value_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
