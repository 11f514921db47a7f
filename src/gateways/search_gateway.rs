// src/gateways/search_gateway.rs
//
// Search API gateway (OMDB).
//
// The gateway is transport + mapping only: it issues one request per call,
// maps the match list into SearchResult values preserving response order,
// and propagates failures. The empty-query short-circuit and the
// catch-to-empty policy live in the search service, not here.

use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::Client;
use serde::Deserialize;

use crate::config::SearchApiConfig;
use crate::domain::{validate_search_result, SearchResult};
use crate::error::{AppError, AppResult};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait SearchGateway: Send + Sync {
    /// One free-text title search. `Ok` carries the matches in upstream
    /// order (possibly empty); `Err` is a transport or parse failure.
    async fn search_by_title(&self, query: &str) -> AppResult<Vec<SearchResult>>;
}

/// Upstream "no results" indicator. Distinct from real API errors such as
/// a rejected key, which must not masquerade as an empty list.
const NO_RESULTS_MARKER: &str = "Movie not found!";

#[derive(Debug, Deserialize)]
struct OmdbSearchResponse {
    #[serde(rename = "Search", default)]
    search: Vec<OmdbSearchEntry>,
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbSearchEntry {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "imdbID")]
    imdb_id: String,
}

/// OMDB-backed search gateway.
pub struct OmdbSearchGateway {
    base_url: String,
    api_key: String,
    http_client: Client,
}

impl OmdbSearchGateway {
    pub fn new(config: &SearchApiConfig, timeout: Duration) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(AppError::Transport)?;

        Ok(Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            http_client,
        })
    }

    fn map_entry(entry: OmdbSearchEntry) -> SearchResult {
        SearchResult {
            external_id: entry.imdb_id,
            title: entry.title,
            year: entry.year,
        }
    }
}

#[async_trait]
impl SearchGateway for OmdbSearchGateway {
    async fn search_by_title(&self, query: &str) -> AppResult<Vec<SearchResult>> {
        let response = self
            .http_client
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str()), ("s", query)])
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let parsed: OmdbSearchResponse = serde_json::from_str(&body)?;

        if parsed.response != "True" {
            let message = parsed
                .error
                .unwrap_or_else(|| "unspecified search API error".to_string());
            if message == NO_RESULTS_MARKER {
                return Ok(Vec::new());
            }
            return Err(AppError::Other(format!("search API error: {message}")));
        }

        let mut results = Vec::with_capacity(parsed.search.len());
        for entry in parsed.search {
            let result = Self::map_entry(entry);
            match validate_search_result(&result) {
                Ok(()) => results.push(result),
                Err(e) => log::warn!("dropping malformed search entry: {e}"),
            }
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> OmdbSearchGateway {
        let config = SearchApiConfig {
            api_key: "test-key".to_string(),
            base_url: "https://www.omdbapi.com".to_string(),
        };
        OmdbSearchGateway::new(&config, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_gateway_creation() {
        let gateway = gateway();
        assert_eq!(gateway.base_url, "https://www.omdbapi.com");
        assert_eq!(gateway.api_key, "test-key");
    }

    #[test]
    fn parses_match_list_preserving_order() {
        let body = r#"{
            "Search": [
                {"Title": "Inception", "Year": "2010", "imdbID": "tt1375666", "Type": "movie"},
                {"Title": "Inception: The Cobol Job", "Year": "2010", "imdbID": "tt5295894", "Type": "movie"}
            ],
            "totalResults": "2",
            "Response": "True"
        }"#;
        let parsed: OmdbSearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.response, "True");

        let results: Vec<SearchResult> = parsed
            .search
            .into_iter()
            .map(OmdbSearchGateway::map_entry)
            .collect();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].external_id, "tt1375666");
        assert_eq!(results[0].title, "Inception");
        assert_eq!(results[0].year, "2010");
        assert_eq!(results[1].external_id, "tt5295894");
    }

    #[test]
    fn parses_no_results_payload() {
        let body = r#"{"Response": "False", "Error": "Movie not found!"}"#;
        let parsed: OmdbSearchResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.search.is_empty());
        assert_eq!(parsed.response, "False");
        assert_eq!(parsed.error.as_deref(), Some(NO_RESULTS_MARKER));
    }

    #[test]
    fn parses_api_error_payload() {
        let body = r#"{"Response": "False", "Error": "Invalid API key!"}"#;
        let parsed: OmdbSearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.error.as_deref(), Some("Invalid API key!"));
    }
}
