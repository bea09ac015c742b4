//! HTTP transport abstraction
//!
//! The client never talks to `reqwest` directly; it goes through the
//! `HttpTransport` trait so the caching layer can decorate it and tests can
//! replace it with an in-process fake.

mod http;
#[cfg(test)]
pub(crate) mod mock;

pub use http::ReqwestTransport;

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::api::TransportError;

/// A fully formed GET request
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// Absolute URL including the query string
    pub url: Url,
    /// Extra request headers (lowercase names)
    pub headers: BTreeMap<String, String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl HttpRequest {
    pub fn new(url: Url, timeout: Duration) -> Self {
        Self {
            url,
            headers: BTreeMap::new(),
            timeout,
        }
    }

    /// Adds a request header, replacing any previous value
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }
}

/// A raw HTTP response as seen by the transport
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    /// Response headers keyed by lowercase name
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Looks up a header by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs the raw request/response exchange
///
/// Implementations must be safe to share between concurrent callers.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[async_trait]
impl<T: HttpTransport + ?Sized> HttpTransport for std::sync::Arc<T> {
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).get(request).await
    }
}
