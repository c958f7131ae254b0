//! Operation wrapper: logs one request-handling unit.
//!
//! An operation derives `{operation: name, ...request.meta}`, writes the
//! merged metadata back onto the request so actions called inside the
//! handler inherit it, then logs the handler's outcome.

use crate::action::CallError;
use crate::context::AutoLog;
use autolog_domain::FIELD_OPERATION;
use autolog_ports::{Next, OperationRequest, OperationResponse, Throwable};
use autolog_shared::{Fields, merge_into};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Request handler wrapped under an explicit operation name.
#[derive(Clone)]
pub struct LoggedOperation<H> {
    name: Arc<str>,
    autolog: AutoLog,
    handler: H,
}

impl<H> LoggedOperation<H> {
    /// Wrap `handler` under `name`.
    #[must_use]
    pub fn new(autolog: AutoLog, name: impl Into<Arc<str>>, handler: H) -> Self {
        Self {
            name: name.into(),
            autolog,
            handler,
        }
    }

    /// Name recorded as the `operation` field.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unwrap the original handler.
    pub fn into_inner(self) -> H {
        self.handler
    }

    /// Run the handler and log its outcome.
    ///
    /// Failures are logged at every level and returned to the caller.
    pub async fn handle<Req, Res, E>(
        &self,
        request: &mut Req,
        response: &mut Res,
    ) -> Result<(), CallError<E>>
    where
        H: AsyncFn(&mut Req, &mut Res) -> Result<(), E>,
        Req: OperationRequest,
        E: Throwable,
    {
        let meta = self.request_meta(request);
        let event = self.autolog.event(meta.clone());
        request.set_meta(meta);

        let level = self.autolog.level();
        if level.logs_operation_start() {
            event.start();
        }

        match (self.handler)(request, response).await {
            Ok(()) => {
                if level.logs_operation_success() {
                    event.success(None);
                }
                Ok(())
            }
            Err(error) => match event.failure(&error).await {
                Ok(()) => Err(CallError::Failed(error)),
                Err(cause) => {
                    tracing::warn!(
                        operation = %self.name,
                        code = %cause.code,
                        "failed to classify operation failure"
                    );
                    Err(CallError::Unclassified { error, cause })
                }
            },
        }
    }

    /// Run as framework middleware.
    ///
    /// A failure goes to `next(Some(error))` unless the handler already sent
    /// the response, in which case it is returned. A success continues the
    /// chain only if nothing was sent.
    pub async fn middleware<Req, Res, E, N>(
        &self,
        request: &mut Req,
        response: &mut Res,
        next: N,
    ) -> Result<(), CallError<E>>
    where
        H: AsyncFn(&mut Req, &mut Res) -> Result<(), E>,
        Req: OperationRequest,
        Res: OperationResponse,
        E: Throwable,
        N: Next<CallError<E>>,
    {
        let outcome = self.handle(request, response).await;
        if response.is_sent() {
            return outcome;
        }
        next.proceed(outcome.err());
        Ok(())
    }

    fn request_meta<Req: OperationRequest>(&self, request: &Req) -> Fields {
        let mut meta = Fields::new();
        meta.insert(FIELD_OPERATION.to_owned(), Value::from(self.name.as_ref()));
        if let Some(existing) = request.meta() {
            merge_into(&mut meta, existing.clone());
        }
        meta
    }
}

impl<H> fmt::Debug for LoggedOperation<H> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LoggedOperation")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
