// src/config/mod.rs
//
// Explicit startup configuration.
//
// API keys are validated once, here. A missing search or catalog key is a
// startup failure; a missing geolocation key switches geolocation into a
// feature-disabled mode where the resolver answers with the default label.
// No component discovers a missing key at call time.

use std::env;
use std::time::Duration;

use crate::error::{AppError, AppResult};

pub const DEFAULT_OMDB_BASE_URL: &str = "https://www.omdbapi.com";
pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IPSTACK_BASE_URL: &str = "https://api.ipstack.com";

const DEFAULT_LOCATION_LABEL: &str = "Select your location";
const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Search API (free-text title search, external identifiers).
#[derive(Debug, Clone)]
pub struct SearchApiConfig {
    pub api_key: String,
    pub base_url: String,
}

/// Details catalog API (cross-reference lookup + full records).
#[derive(Debug, Clone)]
pub struct CatalogApiConfig {
    pub api_key: String,
    pub base_url: String,
}

/// IP-geolocation service (city labels).
#[derive(Debug, Clone)]
pub struct GeolocationApiConfig {
    pub api_key: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub search: SearchApiConfig,
    pub catalog: CatalogApiConfig,
    /// `None` means geolocation is disabled; the resolver falls back to
    /// `default_location` without issuing any call.
    pub geolocation: Option<GeolocationApiConfig>,
    pub default_location: String,
    /// Coalescing delay between a keystroke and the search call. Zero
    /// disables the timer; the latest-request-wins rule still applies.
    pub search_debounce: Duration,
    /// Bounded timeout for every external call. Timeouts surface as
    /// transport failures.
    pub request_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Lets tests exercise validation
    /// without mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let search = SearchApiConfig {
            api_key: required(&lookup, "MOVIEHUB_OMDB_API_KEY")?,
            base_url: lookup("MOVIEHUB_OMDB_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OMDB_BASE_URL.to_string()),
        };

        let catalog = CatalogApiConfig {
            api_key: required(&lookup, "MOVIEHUB_TMDB_API_KEY")?,
            base_url: lookup("MOVIEHUB_TMDB_BASE_URL")
                .unwrap_or_else(|| DEFAULT_TMDB_BASE_URL.to_string()),
        };

        let geolocation = lookup("MOVIEHUB_IPSTACK_API_KEY")
            .filter(|key| !key.is_empty())
            .map(|api_key| GeolocationApiConfig {
                api_key,
                base_url: lookup("MOVIEHUB_IPSTACK_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_IPSTACK_BASE_URL.to_string()),
            });

        let default_location = lookup("MOVIEHUB_DEFAULT_LOCATION")
            .filter(|label| !label.is_empty())
            .unwrap_or_else(|| DEFAULT_LOCATION_LABEL.to_string());

        let search_debounce = Duration::from_millis(parse_u64(
            &lookup,
            "MOVIEHUB_SEARCH_DEBOUNCE_MS",
            DEFAULT_SEARCH_DEBOUNCE_MS,
        )?);

        let request_timeout = Duration::from_secs(parse_u64(
            &lookup,
            "MOVIEHUB_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?);

        Ok(Self {
            search,
            catalog,
            geolocation,
            default_location,
            search_debounce,
            request_timeout,
        })
    }

    pub fn geolocation_enabled(&self) -> bool {
        self.geolocation.is_some()
    }
}

fn required<F>(lookup: &F, key: &str) -> AppResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::Config(format!("{key} is not set")))
}

fn parse_u64<F>(lookup: &F, key: &str, default: u64) -> AppResult<u64>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|_| AppError::Config(format!("{key} must be an integer, got {raw:?}"))),
    }
}
