//! HTTP caching rules: which responses may be stored and for how long

use chrono::{DateTime, Duration, Utc};

use crate::transport::HttpResponse;

/// Largest delta-seconds value honoured; larger values are clamped to it
pub const MAX_DELTA_SECONDS: i64 = 2_147_483_648;

/// The `Cache-Control` directives this cache understands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheDirectives {
    pub no_store: bool,
    pub no_cache: bool,
    pub max_age: Option<i64>,
}

/// Parses a `Cache-Control` header value
///
/// Unknown directives are ignored. A malformed `max-age` is treated as absent,
/// an oversized one is clamped to `MAX_DELTA_SECONDS`.
pub fn parse_cache_control(value: &str) -> CacheDirectives {
    let mut directives = CacheDirectives::default();

    for part in value.split(',') {
        let part = part.trim();
        let (name, arg) = match part.split_once('=') {
            Some((name, arg)) => (name.trim(), Some(arg.trim().trim_matches('"'))),
            None => (part, None),
        };

        match name.to_ascii_lowercase().as_str() {
            "no-store" => directives.no_store = true,
            "no-cache" => directives.no_cache = true,
            "max-age" => {
                directives.max_age = arg.and_then(parse_delta_seconds);
            }
            _ => {}
        }
    }

    directives
}

fn parse_delta_seconds(arg: &str) -> Option<i64> {
    match arg.parse::<i64>() {
        Ok(seconds) => Some(seconds.clamp(0, MAX_DELTA_SECONDS)),
        // Too many digits for an i64
        Err(_) if !arg.is_empty() && arg.bytes().all(|b| b.is_ascii_digit()) => {
            Some(MAX_DELTA_SECONDS)
        }
        Err(_) => None,
    }
}

fn directives_of(response: &HttpResponse) -> CacheDirectives {
    response
        .header("cache-control")
        .map(parse_cache_control)
        .unwrap_or_default()
}

fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// How long a response stays fresh after being received at `now`
pub fn freshness_lifetime(response: &HttpResponse, now: DateTime<Utc>) -> Duration {
    let directives = directives_of(response);
    if directives.no_cache {
        return Duration::zero();
    }
    if let Some(max_age) = directives.max_age {
        return Duration::try_seconds(max_age).unwrap_or_else(max_lifetime);
    }

    // Fall back to Expires, measured against the server's Date when present
    match response.header("expires") {
        Some(expires) => {
            let Some(expires) = parse_http_date(expires) else {
                return Duration::zero();
            };
            let date = response
                .header("date")
                .and_then(parse_http_date)
                .unwrap_or(now);
            (expires - date).clamp(Duration::zero(), max_lifetime())
        }
        None => Duration::zero(),
    }
}

fn max_lifetime() -> Duration {
    Duration::seconds(MAX_DELTA_SECONDS)
}

/// Whether the response carries a validator usable for revalidation
pub fn has_validator(response: &HttpResponse) -> bool {
    response.header("etag").is_some() || response.header("last-modified").is_some()
}

/// Whether a response may be written to the cache
///
/// Only plain `200` responses are stored, and only when they are either
/// fresh for some time or can be revalidated later.
pub fn is_storable(response: &HttpResponse, now: DateTime<Utc>) -> bool {
    if response.status != 200 || directives_of(response).no_store {
        return false;
    }
    freshness_lifetime(response, now) > Duration::zero() || has_validator(response)
}
