// src/lib.rs
// MovieHub - movie discovery core
//
// Architecture:
// - Domain-centric: value objects carry no I/O
// - Trait-seamed: every external API sits behind a gateway trait
// - Event-driven: services announce facts on a synchronous bus
// - Latest wins: stale asynchronous results are discarded, never rendered

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod gateways;
pub mod services;

// ============================================================================
// PUBLIC API
// ============================================================================

pub use application::AppState;

pub use config::AppConfig;

pub use domain::{
    validate_movie_record,
    validate_search_result,
    Coordinates,
    FailureKind,
    MovieRecord,
    ResolutionFailure,
    ResolutionState,
    ResolvedIdentifier,
    SearchResult,
};

pub use error::{AppError, AppResult};

pub use events::{
    DomainEvent,
    EventBus,
    LocationResolved,
    MovieSelected,
    ResolutionStateChanged,
    SearchResultsReplaced,
};

pub use services::{GeolocationService, ResolutionService, SearchPresenter, SearchService};
