// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod geolocation_service;
pub mod resolution_service;
pub mod search_presenter;
pub mod search_service;


pub use geolocation_service::GeolocationService;
pub use resolution_service::ResolutionService;
pub use search_presenter::SearchPresenter;
pub use search_service::SearchService;
