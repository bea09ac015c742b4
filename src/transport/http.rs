//! `reqwest`-backed transport

use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::{Client, Proxy};
use tracing::debug;

use super::{HttpRequest, HttpResponse, HttpTransport};
use crate::api::{ApiError, TransportError, TransportErrorKind};

const USER_AGENT: &str = concat!("mobfot/", env!("CARGO_PKG_VERSION"));

/// Transport performing real HTTP requests
///
/// Clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport, optionally routing every request through `proxy_url`
    ///
    /// Proxy settings from the environment are ignored; only the explicit
    /// proxy is used.
    pub fn new(proxy_url: Option<&str>) -> Result<Self, ApiError> {
        let mut builder = Client::builder().user_agent(USER_AGENT).no_proxy();

        if let Some(proxy_url) = proxy_url {
            let proxy = Proxy::all(proxy_url).map_err(|e| {
                ApiError::Config(format!("invalid proxy URL '{}': {}", proxy_url, e))
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Wraps an existing `reqwest::Client`
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = request.url.as_str();
        debug!(url, "GET");

        let mut builder = self.client.get(url).timeout(request.timeout);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(|e| classify(url, &e))?;

        let status = response.status().as_u16();
        let headers: BTreeMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect();
        let body = response.text().await.map_err(|e| classify(url, &e))?;

        debug!(url, status, bytes = body.len(), "response received");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Maps a `reqwest` failure onto the transport error kinds
fn classify(url: &str, error: &reqwest::Error) -> TransportError {
    let kind = if error.is_timeout() {
        TransportErrorKind::Timeout
    } else if error.is_connect() {
        TransportErrorKind::Connect
    } else {
        TransportErrorKind::Other
    };
    TransportError::new(kind, url, error.to_string())
}
