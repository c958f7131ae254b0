//! Failure categories and call outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse classification of a failure's origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// A successful response was raised as a failure (caller misuse).
    FetchResponseOk,
    /// A transport response with a non-success status.
    FetchResponseError,
    /// A transport-level connection failure (no response received).
    FetchNetworkError,
    /// An unadorned system exception.
    NodeSystemError,
    /// An application failure carrying custom context.
    CustomError,
}

impl Category {
    /// Stable wire name, as written into records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FetchResponseOk => "FETCH_RESPONSE_OK",
            Self::FetchResponseError => "FETCH_RESPONSE_ERROR",
            Self::FetchNetworkError => "FETCH_NETWORK_ERROR",
            Self::NodeSystemError => "NODE_SYSTEM_ERROR",
            Self::CustomError => "CUSTOM_ERROR",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Terminal result of an action or operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The call completed normally.
    Success,
    /// The call raised a failure.
    Failure,
}

impl Outcome {
    /// Stable wire name, as written into records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
