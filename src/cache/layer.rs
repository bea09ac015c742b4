//! Caching decorator around an `HttpTransport`

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use super::policy;
use super::store::{CachedResponse, ResponseStore};
use crate::api::TransportError;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};

/// Transport wrapper that stores and replays responses per HTTP caching rules
///
/// 1. A fresh entry is returned without touching the inner transport
/// 2. A stale entry with validators is revalidated with a conditional request;
///    `304 Not Modified` renews it and the stored body is returned
/// 3. Otherwise the request goes to the network and a storable `200` is kept
///
/// Errors from the inner transport are returned as-is. Stale data is never
/// served in place of an error.
pub struct CachingTransport<T, S> {
    inner: T,
    store: S,
}

impl<T: HttpTransport, S: ResponseStore> CachingTransport<T, S> {
    pub fn new(inner: T, store: S) -> Self {
        Self { inner, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn conditional(request: &HttpRequest, entry: &CachedResponse) -> HttpRequest {
        let mut request = request.clone();
        if let Some(etag) = entry.etag() {
            request = request.with_header("if-none-match", etag);
        }
        if let Some(last_modified) = entry.last_modified() {
            request = request.with_header("if-modified-since", last_modified);
        }
        request
    }

    /// Merges the headers of a `304` into the stored entry and restarts its lifetime
    fn renew(entry: CachedResponse, not_modified: &HttpResponse) -> CachedResponse {
        let now = Utc::now();
        let mut merged = entry.to_response();
        for (name, value) in &not_modified.headers {
            merged.headers.insert(name.clone(), value.clone());
        }
        let lifetime = policy::freshness_lifetime(&merged, now);
        CachedResponse::from_response(&entry.url, &merged, now, lifetime)
    }
}

#[async_trait]
impl<T: HttpTransport, S: ResponseStore> HttpTransport for CachingTransport<T, S> {
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let key = request.url.as_str();
        let cached = self.store.get(key);

        let outbound = match &cached {
            Some(entry) if entry.is_fresh(Utc::now()) => {
                debug!(url = key, "cache hit");
                return Ok(entry.to_response());
            }
            Some(entry) => {
                debug!(url = key, "cache entry stale, revalidating");
                Self::conditional(request, entry)
            }
            None => {
                debug!(url = key, "cache miss");
                request.clone()
            }
        };

        let response = self.inner.get(&outbound).await?;

        if response.status == 304 {
            if let Some(entry) = cached {
                debug!(url = key, "not modified, serving cached body");
                let renewed = Self::renew(entry, &response);
                self.store.put(key, &renewed);
                return Ok(renewed.to_response());
            }
            return Ok(response);
        }

        let now = Utc::now();
        if policy::is_storable(&response, now) {
            let lifetime = policy::freshness_lifetime(&response, now);
            debug!(url = key, lifetime_secs = lifetime.num_seconds(), "storing response");
            self.store
                .put(key, &CachedResponse::from_response(key, &response, now, lifetime));
        } else if cached.is_some() {
            self.store.remove(key);
        }

        Ok(response)
    }
}
