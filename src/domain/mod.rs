// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// All types here are pure value objects: no I/O, no clocks, no network.
// Other modules import from `crate::domain::*`.

pub mod location;
pub mod movie;
pub mod resolution;

// Movie Domain
pub use movie::{validate_movie_record, validate_search_result, MovieRecord, SearchResult};

// Resolution Domain
pub use resolution::{FailureKind, ResolutionFailure, ResolutionState, ResolvedIdentifier};

// Location Domain
pub use location::Coordinates;

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Rating {0} is outside the 0..=10 scale")]
    RatingOutOfRange(f64),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
