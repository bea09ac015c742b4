//! FotMob API client
//!
//! `FotMob` exposes one async method per API resource. Each call validates
//! its arguments, builds the request URL, sends a GET through the shared
//! (optionally caching) transport and returns the decoded JSON as-is.

mod endpoints;
mod error;

pub use endpoints::{
    normalize_date, parse_id, Endpoint, LeagueOptions, Query, TeamOptions,
    BASE_URL,
};
pub use error::{ApiError, TransportError, TransportErrorKind};

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::archive::{self, MatchArchive};
use crate::cache::{CachingTransport, DiskStore, MemoryStore};
use crate::transport::{HttpRequest, HttpTransport, ReqwestTransport};
use endpoints::{require_id, require_text};

/// Per-request timeout applied when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where cached HTTP responses are kept
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CacheMode {
    /// Every call goes to the network
    Disabled,
    /// Responses are cached for the lifetime of the client
    #[default]
    Memory,
    /// Responses are cached as JSON files in the given directory
    Disk(PathBuf),
}

/// Options accepted when constructing a client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, without a trailing slash
    pub base_url: String,
    /// Route all requests through this HTTP/HTTPS proxy
    pub proxy_url: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
    pub cache: CacheMode,
    /// Directory for the finished-match archive; `None` disables it
    pub match_archive: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            proxy_url: None,
            timeout: DEFAULT_TIMEOUT,
            cache: CacheMode::default(),
            match_archive: None,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_proxy(mut self, proxy_url: impl Into<String>) -> Self {
        self.proxy_url = Some(proxy_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_cache(mut self, cache: CacheMode) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_match_archive(mut self, dir: impl Into<PathBuf>) -> Self {
        self.match_archive = Some(dir.into());
        self
    }
}

/// Client for the FotMob API
///
/// Cheap to clone; clones share the connection pool and the response cache.
#[derive(Clone)]
pub struct FotMob {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    timeout: Duration,
    archive: Option<MatchArchive>,
}

impl fmt::Debug for FotMob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FotMob")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("archive", &self.archive)
            .finish_non_exhaustive()
    }
}

impl FotMob {
    /// Creates a client performing real HTTP requests
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(config.proxy_url.as_deref())?;
        Self::with_transport(config, transport)
    }

    /// Creates a client on top of a custom transport
    ///
    /// The configured cache mode is applied around `transport`; `proxy_url`
    /// is ignored since the transport owns the connection.
    pub fn with_transport<T>(config: ClientConfig, transport: T) -> Result<Self, ApiError>
    where
        T: HttpTransport + 'static,
    {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| ApiError::Config(format!("invalid base URL '{}': {}", base_url, e)))?;

        let transport: Arc<dyn HttpTransport> = match config.cache {
            CacheMode::Disabled => Arc::new(transport),
            CacheMode::Memory => Arc::new(CachingTransport::new(transport, MemoryStore::new())),
            CacheMode::Disk(dir) => {
                Arc::new(CachingTransport::new(transport, DiskStore::with_dir(dir)))
            }
        };

        Ok(Self {
            transport,
            base_url,
            timeout: config.timeout,
            archive: config.match_archive.map(MatchArchive::with_dir),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the absolute URL for an endpoint and its query
    pub fn url_for(&self, endpoint: Endpoint, query: &Query) -> Result<Url, ApiError> {
        let raw = format!("{}{}", self.base_url, endpoint.path());
        let url = if query.pairs().is_empty() {
            Url::parse(&raw)
        } else {
            Url::parse_with_params(&raw, query.pairs().iter().map(|(k, v)| (*k, v.as_str())))
        };
        url.map_err(|e| ApiError::Config(format!("invalid request URL '{}': {}", raw, e)))
    }

    /// Sends a GET and decodes the JSON body
    async fn execute(&self, endpoint: Endpoint, query: Query) -> Result<Value, ApiError> {
        let url = self.url_for(endpoint, &query)?;
        let request = HttpRequest::new(url, self.timeout);

        let response = self.transport.get(&request).await?;
        debug!(url = %request.url, status = response.status, "API response");

        if !response.is_success() {
            return Err(ApiError::ApiRequest {
                status: response.status,
                body: response.body,
            });
        }

        serde_json::from_str(&response.body).map_err(|source| ApiError::Decode {
            url: request.url.to_string(),
            source,
        })
    }

    /// Gets all the matches played on a given date
    ///
    /// # Arguments
    /// * `date` - Match day as `YYYYMMDD` (or `YYYY-MM-DD`)
    /// * `timezone` - IANA time zone used to bucket kick-off times
    pub async fn get_matches_by_date(
        &self,
        date: &str,
        timezone: Option<&str>,
    ) -> Result<Value, ApiError> {
        let date = normalize_date(date)?;
        let query = Query::new()
            .required("date", date)
            .optional("timezone", timezone);
        self.execute(Endpoint::Matches, query).await
    }

    /// Gets a league page (overview, table, fixtures...)
    pub async fn get_league(&self, id: u64, options: &LeagueOptions) -> Result<Value, ApiError> {
        let id = require_id("id", id)?;
        let query = Query::new()
            .required("id", id)
            .optional("tab", options.tab.as_deref())
            .optional("type", options.page_type.as_deref())
            .optional("timezone", options.timezone.as_deref())
            .optional("season", options.season.as_deref());
        self.execute(Endpoint::Leagues, query).await
    }

    /// Gets a team page
    pub async fn get_team(&self, id: u64, options: &TeamOptions) -> Result<Value, ApiError> {
        let id = require_id("id", id)?;
        let query = Query::new()
            .required("id", id)
            .optional("tab", options.tab.as_deref())
            .optional("type", options.page_type.as_deref())
            .optional("timezone", options.timezone.as_deref());
        self.execute(Endpoint::Teams, query).await
    }

    /// Gets a player's profile
    pub async fn get_player(&self, id: u64) -> Result<Value, ApiError> {
        let id = require_id("id", id)?;
        self.execute(Endpoint::Player, Query::new().required("id", id))
            .await
    }

    /// Gets the details of a match
    ///
    /// With a match archive configured, a finished match is answered from
    /// disk once it has been fetched.
    pub async fn get_match_details(&self, match_id: u64) -> Result<Value, ApiError> {
        let match_id = require_id("matchId", match_id)?;

        if let Some(details) = self.archive.as_ref().and_then(|a| a.load(match_id)) {
            debug!(match_id, "match served from archive");
            return Ok(details);
        }

        self.fetch_match_details(match_id).await
    }

    /// Gets the details of a match from the API, ignoring the archive
    ///
    /// The archive is still updated if the match has finished.
    pub async fn refresh_match_details(&self, match_id: u64) -> Result<Value, ApiError> {
        let match_id = require_id("matchId", match_id)?;
        self.fetch_match_details(match_id).await
    }

    async fn fetch_match_details(&self, match_id: u64) -> Result<Value, ApiError> {
        let details = self
            .execute(Endpoint::MatchDetails, Query::new().required("matchId", match_id))
            .await?;

        if let Some(archive) = &self.archive {
            if archive::is_finished(&details) {
                match archive.store(match_id, &details) {
                    Ok(()) => debug!(match_id, "finished match archived"),
                    Err(e) => warn!(match_id, error = %e, "failed to archive match"),
                }
            }
        }

        Ok(details)
    }

    /// Gets where a match is broadcast
    pub async fn get_match_tv_listing(
        &self,
        match_id: u64,
        country_code: Option<&str>,
    ) -> Result<Value, ApiError> {
        let match_id = require_id("matchId", match_id)?;
        let query = Query::new()
            .required("matchId", match_id)
            .optional("countryCode", country_code);
        self.execute(Endpoint::TvListing, query).await
    }

    /// Gets TV listings for a country
    pub async fn get_tv_listings_country(
        &self,
        country_code: Option<&str>,
    ) -> Result<Value, ApiError> {
        let query = Query::new().optional("countryCode", country_code);
        self.execute(Endpoint::TvListings, query).await
    }

    /// Searches teams, players, leagues and matches
    pub async fn search(&self, term: &str, user_language: Option<&str>) -> Result<Value, ApiError> {
        let term = require_text("query", term)?;
        let query = Query::new()
            .required("query", term)
            .optional("userLanguage", user_language);
        self.execute(Endpoint::Search, query).await
    }
}
