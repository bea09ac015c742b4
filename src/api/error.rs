//! Error taxonomy for FotMob API calls
//!
//! Every failure of a client call maps to exactly one `ApiError` variant so
//! callers can tell bad input, an unreachable API, an API that answered with
//! an error status and a payload that is not JSON apart.

use thiserror::Error;

/// Broad classification of a network-level failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// The request did not complete within the configured timeout
    Timeout,
    /// The connection could not be established (DNS, refused, TLS)
    Connect,
    /// Any other failure while sending the request or reading the body
    Other,
}

/// A network-level failure, raised before any HTTP status was received
#[derive(Debug, Clone, Error)]
#[error("{kind:?} error requesting {url}: {message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub url: String,
    pub message: String,
}

impl TransportError {
    pub fn new(
        kind: TransportErrorKind,
        url: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn is_timeout(&self) -> bool {
        self.kind == TransportErrorKind::Timeout
    }
}

/// Errors returned by `FotMob` operations
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required parameter was missing or malformed; no request was sent
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// The API could not be reached
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The API answered with a non-success status
    #[error("API request failed with status {status}: {body}")]
    ApiRequest { status: u16, body: String },

    /// The API answered with a success status but the body is not JSON
    #[error("Failed to decode JSON response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The client configuration is unusable
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl ApiError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        ApiError::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    /// HTTP status carried by an `ApiRequest` error
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::ApiRequest { status, .. } => Some(*status),
            _ => None,
        }
    }
}
