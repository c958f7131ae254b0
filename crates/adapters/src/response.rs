//! Buffered transport responses and fetch failures.
//!
//! [`CapturedResponse`] holds a status, headers and a fully read body, so it
//! can be raised as a failure and classified later without holding a live
//! connection. With the `reqwest` feature, [`send_checked`] turns a request
//! into either a live response or a [`FetchFailure`].

use autolog_domain::NetworkError;
use autolog_ports::{BoxFuture, FetchResponse, NetworkFailure, Throwable};
use autolog_shared::ErrorEnvelope;
use std::fmt;

/// Response with a buffered body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedResponse {
    status: u16,
    headers: Vec<(Box<str>, Box<str>)>,
    body: Vec<u8>,
}

impl CapturedResponse {
    /// Create an empty response with the given status.
    #[must_use]
    pub const fn new(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Add a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<Box<str>>, value: impl Into<Box<str>>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the raw body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Buffer a live `reqwest` response.
    #[cfg(feature = "reqwest")]
    pub async fn capture(response: reqwest::Response) -> Result<Self, ErrorEnvelope> {
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (Box::from(name.as_str()), Box::from(value)))
            })
            .collect();
        let body = response.bytes().await.map_err(|error| {
            ErrorEnvelope::classification_failed(format!("failed to read response body: {error}"))
                .with_metadata("status", status.to_string())
        })?;

        Ok(Self {
            status,
            headers,
            body: body.to_vec(),
        })
    }
}

impl FetchResponse for CapturedResponse {
    fn status(&self) -> u16 {
        self.status
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_ref())
    }

    fn body(&self) -> BoxFuture<'_, Result<Vec<u8>, ErrorEnvelope>> {
        Box::pin(async move { Ok(self.body.clone()) })
    }
}

impl Throwable for CapturedResponse {
    fn as_response(&self) -> Option<&dyn FetchResponse> {
        Some(self)
    }
}

impl fmt::Display for CapturedResponse {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "response failed with status {}", self.status)
    }
}

impl std::error::Error for CapturedResponse {}

/// A failed fetch: either a non-success response or a connection failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// The server answered with a non-success status.
    Response(CapturedResponse),
    /// No response was received.
    Network(NetworkError),
}

impl Throwable for FetchFailure {
    fn as_response(&self) -> Option<&dyn FetchResponse> {
        match self {
            Self::Response(response) => Some(response),
            Self::Network(_) => None,
        }
    }

    fn as_network_error(&self) -> Option<NetworkFailure<'_>> {
        match self {
            Self::Response(_) => None,
            Self::Network(error) => error.as_network_error(),
        }
    }
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Response(response) => fmt::Display::fmt(response, formatter),
            Self::Network(error) => fmt::Display::fmt(error, formatter),
        }
    }
}

impl std::error::Error for FetchFailure {}

/// Map a `reqwest` transport error to a connection failure.
#[cfg(feature = "reqwest")]
#[must_use]
pub fn network_error_from_reqwest(error: &reqwest::Error) -> NetworkError {
    let code = if error.is_timeout() {
        "ETIMEDOUT"
    } else if error.is_connect() {
        "ECONNREFUSED"
    } else if error.is_redirect() {
        "EREDIRECT"
    } else {
        "EREQUEST"
    };
    NetworkError::new(error.to_string()).with_code(code)
}

/// Send a request; non-success statuses come back buffered as failures.
#[cfg(feature = "reqwest")]
pub async fn send_checked(
    request: reqwest::RequestBuilder,
) -> Result<reqwest::Response, FetchFailure> {
    let response = request
        .send()
        .await
        .map_err(|error| FetchFailure::Network(network_error_from_reqwest(&error)))?;
    if response.status().is_success() {
        return Ok(response);
    }

    match CapturedResponse::capture(response).await {
        Ok(captured) => Err(FetchFailure::Response(captured)),
        Err(error) => Err(FetchFailure::Network(
            NetworkError::new(error.message).with_code("EBODY"),
        )),
    }
}
