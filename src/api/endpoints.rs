//! Endpoint descriptors and parameter validation
//!
//! Each API operation maps to a fixed path under the base URL. Parameter
//! values are validated here, before any request is built.

use chrono::NaiveDate;

use super::ApiError;

/// Base URL of the public FotMob API
pub const BASE_URL: &str = "https://www.fotmob.com/api";

/// One API operation's path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Matches,
    Leagues,
    Teams,
    Player,
    MatchDetails,
    TvListing,
    TvListings,
    Search,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Matches => "/matches",
            Endpoint::Leagues => "/leagues",
            Endpoint::Teams => "/teams",
            Endpoint::Player => "/playerData",
            Endpoint::MatchDetails => "/matchDetails",
            Endpoint::TvListing => "/tvlisting",
            Endpoint::TvListings => "/tvlistings",
            Endpoint::Search => "/search",
        }
    }
}

/// Ordered query parameters; unset optional values are never added
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(&'static str, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self, name: &'static str, value: impl ToString) -> Self {
        self.pairs.push((name, value.to_string()));
        self
    }

    /// Adds the parameter only when a non-blank value is given; the value is sent as is
    pub fn optional(mut self, name: &'static str, value: Option<&str>) -> Self {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            self.pairs.push((name, value.to_string()));
        }
        self
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }
}

/// Checks that a numeric identifier is present (non-zero)
pub fn require_id(name: &'static str, id: u64) -> Result<u64, ApiError> {
    if id == 0 {
        return Err(ApiError::invalid(name, "missing identifier (must be a positive integer)"));
    }
    Ok(id)
}

/// Parses caller-supplied text into a numeric identifier
pub fn parse_id(name: &'static str, raw: &str) -> Result<u64, ApiError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ApiError::invalid(name, "missing identifier"));
    }
    let id = raw
        .parse::<u64>()
        .map_err(|_| ApiError::invalid(name, format!("'{}' is not a numeric identifier", raw)))?;
    require_id(name, id)
}

/// Checks that a free-text parameter is not blank and returns it unchanged
pub fn require_text<'a>(name: &'static str, value: &'a str) -> Result<&'a str, ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::invalid(name, "must not be empty"));
    }
    Ok(value)
}

/// Normalises a match date to the `YYYYMMDD` form the API expects
///
/// Both `20240817` and `2024-08-17` are accepted; the date must exist.
pub fn normalize_date(value: &str) -> Result<String, ApiError> {
    let value = require_text("date", value)?.trim();
    let parsed = NaiveDate::parse_from_str(value, "%Y%m%d")
        .ok()
        .filter(|_| value.len() == 8)
        .or_else(|| NaiveDate::parse_from_str(value, "%Y-%m-%d").ok())
        .ok_or_else(|| ApiError::invalid("date", format!("'{}' is not a date (YYYYMMDD)", value)))?;
    Ok(parsed.format("%Y%m%d").to_string())
}

/// Optional parameters for `get_league`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeagueOptions {
    /// Page tab, e.g. `overview`, `table`, `fixtures`
    pub tab: Option<String>,
    /// Page type, e.g. `league` or `cup`
    pub page_type: Option<String>,
    pub timezone: Option<String>,
    /// Season label, e.g. `2023/2024`
    pub season: Option<String>,
}

impl LeagueOptions {
    pub fn tab(mut self, tab: impl Into<String>) -> Self {
        self.tab = Some(tab.into());
        self
    }

    pub fn page_type(mut self, page_type: impl Into<String>) -> Self {
        self.page_type = Some(page_type.into());
        self
    }

    pub fn timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    pub fn season(mut self, season: impl Into<String>) -> Self {
        self.season = Some(season.into());
        self
    }
}

/// Optional parameters for `get_team`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamOptions {
    pub tab: Option<String>,
    pub page_type: Option<String>,
    pub timezone: Option<String>,
}

impl TeamOptions {
    pub fn tab(mut self, tab: impl Into<String>) -> Self {
        self.tab = Some(tab.into());
        self
    }

    pub fn page_type(mut self, page_type: impl Into<String>) -> Self {
        self.page_type = Some(page_type.into());
        self
    }

    pub fn timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }
}
