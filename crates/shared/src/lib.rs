//! # autolog-shared
//!
//! Shared error handling and metadata utilities for the autolog workspace.
//!
//! This crate provides foundational types that are used across all other crates:
//!
//! - Result and error envelope types
//! - The metadata trimmer (`trim`, `remove_keys`, CSV field lists)
//! - Secret-key redaction for sinks
//!
//! ## Design Principles
//!
//! 1. **No workspace dependencies** - This crate only depends on external crates
//! 2. **Pure helpers** - Nothing here performs I/O
//! 3. **Serde-compatible** - All public types support serialization

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod errors;
pub mod fields;
pub mod redaction;
pub mod result;

pub use errors::{ErrorClass, ErrorCode, ErrorEnvelope, ErrorKind, ErrorMetadata};
pub use fields::{
    Fields, field_list_from_csv, is_empty_value, merge_into, remove_keys, trim, trim_owned,
};
pub use redaction::{REDACTED, is_secret_key, redact_fields, redact_value};
pub use result::Result;

/// Returns the shared crate version.
#[must_use]
pub const fn shared_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// =============================================================================
// TESTS
// =============================================================================
