//! # autolog-domain
//!
//! Value objects for structured-event logging.
//!
//! This crate contains the domain model with no infrastructure dependencies:
//!
//! - **Categories** - `Category`, `Outcome`
//! - **Muting** - canonical keys, `ALWAYS_MUTED`, `UNMUTABLE`
//! - **Failure values** - `Exception`, `NetworkError`
//!
//! ## Dependency Rules
//!
//! - Depends only on `shared` crate
//! - No infrastructure or adapter dependencies
//! - Pure domain logic with no I/O

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

// Re-export shared types for convenience
pub use autolog_shared::shared_crate_version;

// =============================================================================
// DOMAIN MODULES
// =============================================================================

pub mod category;
pub mod exception;
pub mod muting;

pub use category::{Category, Outcome};
pub use exception::{DEFAULT_EXCEPTION_NAME, Exception, NetworkError};
pub use muting::{
    ALWAYS_MUTED, FIELD_ACTION, FIELD_CATEGORY, FIELD_DATA, FIELD_MESSAGE, FIELD_OPERATION,
    FIELD_RESULT, FIELD_STATUS, FIELD_USER, UNMUTABLE, effective_muted_fields,
};

/// Returns the domain crate version.
#[must_use]
pub const fn domain_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// =============================================================================
// TESTS
// =============================================================================
