// src/application/state.rs

use std::sync::Arc;

use crate::events::EventBus;
use crate::services::{GeolocationService, ResolutionService, SearchPresenter, SearchService};

/// Application state handed to the host.
/// All fields are Arc-wrapped for thread-safe sharing.
/// Services are wired in main.rs (or the host's equivalent) and passed here.
pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub search_service: Arc<SearchService>,
    pub search_presenter: Arc<SearchPresenter>,
    pub resolution_service: Arc<ResolutionService>,
    pub geolocation_service: Arc<GeolocationService>,
}
