// src/gateways/catalog_gateway.rs
//
// Details catalog gateway (TMDB).
//
// Two seams over one upstream: the cross-reference lookup (external ID ->
// internal ID) and the details fetch (internal ID -> full record). The
// details API does not accept the identifier the search API returns, which
// is the whole reason the resolution pipeline has two hops.

use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::config::CatalogApiConfig;
use crate::domain::{validate_movie_record, MovieRecord};
use crate::error::{AppError, AppResult};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait CrossReferenceGateway: Send + Sync {
    /// Resolve an external identifier to the catalog's internal one.
    /// `Ok(None)` means no mapping exists - a legitimate outcome, distinct
    /// from `Err` (transport/parse failure).
    async fn find_by_external_id(&self, external_id: &str) -> AppResult<Option<String>>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait DetailsGateway: Send + Sync {
    /// Fetch the full record for an internal identifier. Fails with
    /// `AppError::NotFound` when the identifier yields no record.
    async fn fetch_movie(&self, internal_id: &str) -> AppResult<MovieRecord>;
}

#[derive(Debug, Deserialize)]
struct FindResponse {
    #[serde(default)]
    movie_results: Vec<MovieStub>,
}

#[derive(Debug, Deserialize)]
struct MovieStub {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct MovieDetailsResponse {
    id: u64,
    title: String,
    poster_path: Option<String>,
    #[serde(default)]
    overview: Option<String>,
    #[serde(default)]
    release_date: Option<String>,
    vote_average: f64,
}

/// TMDB-backed catalog gateway. Serves both hops of the pipeline.
pub struct TmdbCatalogGateway {
    base_url: String,
    api_key: String,
    http_client: Client,
}

impl TmdbCatalogGateway {
    pub fn new(config: &CatalogApiConfig, timeout: Duration) -> AppResult<Self> {
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

    fn map_details(details: MovieDetailsResponse) -> MovieRecord {
        MovieRecord {
            internal_id: details.id.to_string(),
            title: details.title,
            // Empty string from upstream reads as "no poster"
            poster_path: details.poster_path.filter(|path| !path.is_empty()),
            overview: details.overview.unwrap_or_default(),
            release_date: details.release_date.unwrap_or_default(),
            rating: details.vote_average,
        }
    }
}

#[async_trait]
impl CrossReferenceGateway for TmdbCatalogGateway {
    async fn find_by_external_id(&self, external_id: &str) -> AppResult<Option<String>> {
        let url = format!("{}/find/{}", self.base_url, external_id);
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("external_source", "imdb_id"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let parsed: FindResponse = serde_json::from_str(&body)?;

        // First match wins; upstream ranking is trusted, no local re-rank
        Ok(parsed.movie_results.first().map(|stub| stub.id.to_string()))
    }
}

#[async_trait]
impl DetailsGateway for TmdbCatalogGateway {
    async fn fetch_movie(&self, internal_id: &str) -> AppResult<MovieRecord> {
        let url = format!("{}/movie/{}", self.base_url, internal_id);
        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound);
        }
        let response = response.error_for_status()?;

        let body = response.text().await?;
        let parsed: MovieDetailsResponse = serde_json::from_str(&body)?;

        let record = Self::map_details(parsed);
        validate_movie_record(&record)?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> TmdbCatalogGateway {
        let config = CatalogApiConfig {
            api_key: "test-key".to_string(),
            base_url: "https://api.themoviedb.org/3".to_string(),
        };
        TmdbCatalogGateway::new(&config, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_gateway_creation() {
        let gateway = gateway();
        assert_eq!(gateway.base_url, "https://api.themoviedb.org/3");
        assert_eq!(gateway.api_key, "test-key");
    }

    #[test]
    fn parses_find_response_first_match_wins() {
        let body = r#"{
            "movie_results": [
                {"id": 27205, "title": "Inception"},
                {"id": 99999, "title": "Inception (bootleg)"}
            ],
            "person_results": [],
            "tv_results": []
        }"#;
        let parsed: FindResponse = serde_json::from_str(body).unwrap();
        let internal_id = parsed.movie_results.first().map(|m| m.id.to_string());
        assert_eq!(internal_id.as_deref(), Some("27205"));
    }

    #[test]
    fn parses_find_response_with_no_mapping() {
        let body = r#"{"movie_results": [], "tv_results": []}"#;
        let parsed: FindResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.movie_results.is_empty());
    }

    #[test]
    fn maps_details_into_record() {
        let body = r#"{
            "id": 27205,
            "title": "Inception",
            "poster_path": "/inception.jpg",
            "overview": "A thief who steals corporate secrets.",
            "release_date": "2010-07-15",
            "vote_average": 8.4,
            "runtime": 148
        }"#;
        let parsed: MovieDetailsResponse = serde_json::from_str(body).unwrap();
        let record = TmdbCatalogGateway::map_details(parsed);

        assert_eq!(record.internal_id, "27205");
        assert_eq!(record.title, "Inception");
        assert_eq!(record.poster_path.as_deref(), Some("/inception.jpg"));
        assert_eq!(record.release_date, "2010-07-15");
        assert!((record.rating - 8.4).abs() < f64::EPSILON);
        assert!(validate_movie_record(&record).is_ok());
    }

    #[test]
    fn missing_poster_maps_to_absent() {
        let body = r#"{
            "id": 27205,
            "title": "Inception",
            "poster_path": null,
            "overview": "",
            "release_date": "2010-07-15",
            "vote_average": 8.4
        }"#;
        let parsed: MovieDetailsResponse = serde_json::from_str(body).unwrap();
        let record = TmdbCatalogGateway::map_details(parsed);
        assert_eq!(record.poster_path, None);

        let body_empty = r#"{
            "id": 27205,
            "title": "Inception",
            "poster_path": "",
            "vote_average": 8.4
        }"#;
        let parsed: MovieDetailsResponse = serde_json::from_str(body_empty).unwrap();
        let record = TmdbCatalogGateway::map_details(parsed);
        assert_eq!(record.poster_path, None);
    }
}
