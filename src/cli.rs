//! Command-line interface parsing for mobfot
//!
//! This module handles parsing of CLI arguments using clap and turns them
//! into a `ClientConfig` plus the API call to perform.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde_json::Value;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

use crate::api::{
    parse_id, ApiError, CacheMode, ClientConfig, FotMob, LeagueOptions, TeamOptions, BASE_URL,
};
use crate::archive::MatchArchive;
use crate::cache::DiskStore;

/// Error types for the command-line front end
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified log level is not recognized
    #[error("Invalid log level: '{0}'. Valid levels: error, warn, info, debug, trace")]
    InvalidLogLevel(String),

    /// The API call failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The payload could not be printed
    #[error("Failed to format output: {0}")]
    Output(#[from] serde_json::Error),
}

/// mobfot - query the FotMob football API from the terminal
#[derive(Parser, Debug)]
#[command(name = "mobfot")]
#[command(about = "Unofficial FotMob API client")]
#[command(version)]
pub struct Cli {
    /// API root URL
    #[arg(long, env = "MOBFOT_BASE_URL", value_name = "URL", hide = true)]
    pub base_url: Option<String>,

    /// Route requests through an HTTP/HTTPS proxy
    #[arg(long, env = "MOBFOT_PROXY", value_name = "URL")]
    pub proxy: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "MOBFOT_TIMEOUT", value_name = "SECS", default_value_t = 10)]
    pub timeout: u64,

    /// Disable HTTP response caching
    #[arg(long)]
    pub no_cache: bool,

    /// Directory for cached HTTP responses (default: user cache dir)
    #[arg(long, env = "MOBFOT_CACHE_DIR", value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Do not read or write the finished-match archive
    #[arg(long)]
    pub no_archive: bool,

    /// Directory for archived finished matches (default: user data dir)
    #[arg(long, env = "MOBFOT_ARCHIVE_DIR", value_name = "DIR")]
    pub archive_dir: Option<PathBuf>,

    /// Log level written to stderr: error, warn, info, debug, trace
    #[arg(
        long,
        env = "MOBFOT_LOG_LEVEL",
        value_name = "LEVEL",
        default_value = "warn",
        value_parser = parse_log_level
    )]
    pub log_level: LevelFilter,

    /// Print JSON on a single line
    #[arg(long)]
    pub compact: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// One subcommand per API operation
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// All matches on a date (YYYYMMDD or YYYY-MM-DD)
    Matches {
        date: String,
        #[arg(long)]
        timezone: Option<String>,
    },
    /// A league page
    League {
        id: String,
        #[arg(long)]
        tab: Option<String>,
        #[arg(long = "type")]
        page_type: Option<String>,
        #[arg(long)]
        timezone: Option<String>,
        #[arg(long)]
        season: Option<String>,
    },
    /// A team page
    Team {
        id: String,
        #[arg(long)]
        tab: Option<String>,
        #[arg(long = "type")]
        page_type: Option<String>,
        #[arg(long)]
        timezone: Option<String>,
    },
    /// A player profile
    Player { id: String },
    /// Details of a single match
    Match {
        id: String,
        /// Fetch from the API even if the match is archived
        #[arg(long)]
        refresh: bool,
    },
    /// Broadcasters for a match
    TvListing {
        match_id: String,
        #[arg(long)]
        country: Option<String>,
    },
    /// TV listings for a country
    TvListings {
        #[arg(long)]
        country: Option<String>,
    },
    /// Search teams, players and leagues
    Search {
        term: String,
        #[arg(long)]
        language: Option<String>,
    },
}

/// Parses a log level name
///
/// Accepts the usual level names plus `warning` and `critical` aliases.
pub fn parse_log_level(s: &str) -> Result<LevelFilter, CliError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "off" => Ok(LevelFilter::OFF),
        "error" | "critical" => Ok(LevelFilter::ERROR),
        "warn" | "warning" => Ok(LevelFilter::WARN),
        "info" => Ok(LevelFilter::INFO),
        "debug" => Ok(LevelFilter::DEBUG),
        "trace" => Ok(LevelFilter::TRACE),
        _ => Err(CliError::InvalidLogLevel(s.to_string())),
    }
}

impl Cli {
    /// Builds the client configuration from the global flags
    ///
    /// Caching defaults to the on-disk store in the user cache directory,
    /// falling back to memory when no home directory exists.
    pub fn client_config(&self) -> ClientConfig {
        let cache = if self.no_cache {
            CacheMode::Disabled
        } else if let Some(dir) = &self.cache_dir {
            CacheMode::Disk(dir.clone())
        } else {
            DiskStore::new()
                .map(|store| CacheMode::Disk(store.dir().to_path_buf()))
                .unwrap_or(CacheMode::Memory)
        };

        let match_archive = if self.no_archive {
            None
        } else {
            self.archive_dir
                .clone()
                .or_else(|| MatchArchive::new().map(|a| a.dir().to_path_buf()))
        };

        ClientConfig {
            base_url: self.base_url.clone().unwrap_or_else(|| BASE_URL.to_string()),
            proxy_url: self.proxy.clone(),
            timeout: Duration::from_secs(self.timeout),
            cache,
            match_archive,
        }
    }
}

impl Command {
    /// Performs the API call this subcommand names
    pub async fn run(&self, client: &FotMob) -> Result<Value, ApiError> {
        match self {
            Command::Matches { date, timezone } => {
                client.get_matches_by_date(date, timezone.as_deref()).await
            }
            Command::League {
                id,
                tab,
                page_type,
                timezone,
                season,
            } => {
                let options = LeagueOptions {
                    tab: tab.clone(),
                    page_type: page_type.clone(),
                    timezone: timezone.clone(),
                    season: season.clone(),
                };
                client.get_league(parse_id("id", id)?, &options).await
            }
            Command::Team {
                id,
                tab,
                page_type,
                timezone,
            } => {
                let options = TeamOptions {
                    tab: tab.clone(),
                    page_type: page_type.clone(),
                    timezone: timezone.clone(),
                };
                client.get_team(parse_id("id", id)?, &options).await
            }
            Command::Player { id } => client.get_player(parse_id("id", id)?).await,
            Command::Match { id, refresh } => {
                let match_id = parse_id("matchId", id)?;
                if *refresh {
                    client.refresh_match_details(match_id).await
                } else {
                    client.get_match_details(match_id).await
                }
            }
            Command::TvListing { match_id, country } => {
                client
                    .get_match_tv_listing(parse_id("matchId", match_id)?, country.as_deref())
                    .await
            }
            Command::TvListings { country } => {
                client.get_tv_listings_country(country.as_deref()).await
            }
            Command::Search { term, language } => client.search(term, language.as_deref()).await,
        }
    }
}

/// Renders a payload for stdout
pub fn render(value: &Value, compact: bool) -> Result<String, CliError> {
    let text = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(text)
}
