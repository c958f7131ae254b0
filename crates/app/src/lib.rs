//! # autolog-app
//!
//! Failure classification, event emission, and the action/operation
//! wrappers. This crate depends on `ports`, `domain`, `config`, and `shared`.

pub mod action;
pub mod classify;
pub mod context;
pub mod event;
pub mod middleware;
pub mod operation;

/// Crate metadata.
pub mod placeholder {
    /// Returns the app crate version.
    #[must_use]
    pub const fn app_crate_version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

pub use action::{CallError, LoggedAction, MAX_POSITIONAL_ARGS};
pub use classify::{
    Classified, RESPONSE_OK_MESSAGE, SERVER_ERROR_STATUS, classify, classify_now,
};
pub use context::AutoLog;
pub use event::Event;
pub use middleware::{
    FIELD_REQUEST_ID, FIELD_TRANSACTION_ID, assign_request_id, assign_transaction_id,
    request_id_middleware, transaction_id_middleware,
};
pub use operation::LoggedOperation;
pub use placeholder::app_crate_version;
