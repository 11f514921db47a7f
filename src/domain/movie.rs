// src/domain/movie.rs
//
// Movie value objects.
//
// A SearchResult lives only as long as the query that produced it; the
// result list is replaced as a unit on every query change. A MovieRecord
// is created once per successful details fetch, is immutable afterwards,
// and is replaced wholesale on a new lookup - never partially updated.

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// One entry in a search result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Cross-catalog external identifier (e.g. "tt1375666"). Immutable.
    pub external_id: String,
    pub title: String,
    pub year: String,
}

/// Full catalog record for a single movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    /// Identifier in the details catalog, obtained via the cross-reference
    /// bridge. Not interchangeable with the external identifier.
    pub internal_id: String,
    pub title: String,
    /// Absent when the catalog has no poster - never an empty string, so
    /// the presentation layer can decide on a placeholder.
    pub poster_path: Option<String>,
    pub overview: String,
    pub release_date: String,
    pub rating: f64,
}

pub fn validate_search_result(result: &SearchResult) -> DomainResult<()> {
    if result.external_id.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "SearchResult.external_id must not be empty".to_string(),
        ));
    }
    if result.title.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "SearchResult.title must not be empty".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_movie_record(record: &MovieRecord) -> DomainResult<()> {
    if record.internal_id.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "MovieRecord.internal_id must not be empty".to_string(),
        ));
    }
    if record.title.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "MovieRecord.title must not be empty".to_string(),
        ));
    }
    if matches!(&record.poster_path, Some(path) if path.is_empty()) {
        return Err(DomainError::InvariantViolation(
            "MovieRecord.poster_path must be absent, not empty".to_string(),
        ));
    }
    if !record.rating.is_finite() || !(0.0..=10.0).contains(&record.rating) {
        return Err(DomainError::RatingOutOfRange(record.rating));
    }
    Ok(())
}
