//! # autolog-ports
//!
//! Port traits for the autolog structured-event logging layer.
//!
//! This crate defines the interfaces between the logging core and the outside
//! world: the record sink, the failure capability set, and the middleware
//! protocol of the host request framework. It depends only on `domain` and
//! `shared`.

use std::future::Future;
use std::pin::Pin;

/// Boxed future used by port traits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub mod failure;
pub mod logger;
pub mod request;

pub use failure::*;
pub use logger::*;
pub use request::*;

// Re-export selected domain types used in port signatures, so adapter crates
// can implement ports without directly depending on `autolog-domain`.
pub use autolog_domain::{Exception, NetworkError};
