//! Correlation-id middleware.

use autolog_ports::{Next, OperationRequest};
use autolog_shared::{Fields, merge_into};
use serde_json::Value;
use uuid::Uuid;

/// Request meta field and header carrying the request id.
pub const FIELD_REQUEST_ID: &str = "requestId";
/// Request meta field and header carrying the transaction id.
pub const FIELD_TRANSACTION_ID: &str = "transactionId";

/// Put a `requestId` into the request meta and return it.
///
/// Taken from the `requestId` header, else the `transactionId` header, else
/// a fresh v4 UUID. Blank headers count as missing.
pub fn assign_request_id<R: OperationRequest + ?Sized>(request: &mut R) -> String {
    let request_id = [FIELD_REQUEST_ID, FIELD_TRANSACTION_ID]
        .into_iter()
        .find_map(|header| {
            request
                .header(header)
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_owned)
        })
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    set_meta_field(request, FIELD_REQUEST_ID, &request_id);
    request_id
}

/// Put a fresh `transactionId` into the request meta and return it.
pub fn assign_transaction_id<R: OperationRequest + ?Sized>(request: &mut R) -> String {
    let transaction_id = Uuid::new_v4().to_string();
    set_meta_field(request, FIELD_TRANSACTION_ID, &transaction_id);
    transaction_id
}

/// [`assign_request_id`] shaped as middleware; always continues the chain.
pub fn request_id_middleware<R, E, N>(request: &mut R, next: N)
where
    R: OperationRequest + ?Sized,
    N: Next<E>,
{
    let request_id = assign_request_id(request);
    tracing::trace!(request_id = %request_id, "request id assigned");
    next.proceed(None);
}

/// [`assign_transaction_id`] shaped as middleware; always continues the chain.
pub fn transaction_id_middleware<R, E, N>(request: &mut R, next: N)
where
    R: OperationRequest + ?Sized,
    N: Next<E>,
{
    assign_transaction_id(request);
    next.proceed(None);
}

fn set_meta_field<R: OperationRequest + ?Sized>(request: &mut R, key: &str, value: &str) {
    let mut meta = request.meta().cloned().unwrap_or_default();
    let mut field = Fields::new();
    field.insert(key.to_owned(), Value::from(value));
    merge_into(&mut meta, field);
    request.set_meta(meta);
}
