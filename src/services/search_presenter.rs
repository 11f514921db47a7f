// src/services/search_presenter.rs
//
// Search Presenter - binds raw input changes to the search client.
//
// Two disciplines keep fast typing correct:
// - a debounce timer coalesces keystrokes before any search is issued
// - a per-call generation token enforces latest-request-wins: a completed
//   search only commits its results if no newer input arrived since it
//   began. The token rule is the correctness backstop at any debounce
//   delay, including zero.
//
// The result list is replaced as a unit on every commit; there are no
// partial updates. Selection emits a MovieSelected event - the presenter
// knows nothing about routes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::domain::SearchResult;
use crate::events::{EventBus, MovieSelected, SearchResultsReplaced};
use crate::services::SearchService;

pub struct SearchPresenter {
    search_service: Arc<SearchService>,
    event_bus: Arc<EventBus>,
    debounce: Duration,
    /// Sequence token: bumped on every input change. A search commits only
    /// while its token is still the newest.
    generation: AtomicU64,
    results: Mutex<Vec<SearchResult>>,
}

impl SearchPresenter {
    pub fn new(
        search_service: Arc<SearchService>,
        event_bus: Arc<EventBus>,
        debounce: Duration,
    ) -> Self {
        Self {
            search_service,
            event_bus,
            debounce,
            generation: AtomicU64::new(0),
            results: Mutex::new(Vec::new()),
        }
    }

    /// Handle one input-change event carrying the full current text.
    ///
    /// An empty text skips the debounce timer: clearing the box empties
    /// the list immediately (the search service short-circuits without a
    /// network call).
    pub async fn input_changed(&self, text: &str) {
        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if !self.debounce.is_zero() && !text.is_empty() {
            tokio::time::sleep(self.debounce).await;
            if !self.is_current(token) {
                log::debug!("keystroke {text:?} superseded during debounce");
                return;
            }
        }

        let results = self.search_service.search(text).await;
        self.commit(token, text, results);
    }

    /// Snapshot of the current result list.
    pub fn results(&self) -> Vec<SearchResult> {
        self.results.lock().unwrap().clone()
    }

    /// Announce a selection. Navigation is the subscriber's job.
    pub fn select(&self, external_id: &str) {
        self.event_bus
            .emit(MovieSelected::new(external_id.to_string()));
    }

    fn is_current(&self, token: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == token
    }

    /// Commit a result list if its token is still the newest. The token
    /// compare and the list write happen under one lock, so a stale
    /// search finishing on another worker thread can never slip between
    /// a newer commit's check and its write.
    fn commit(&self, token: u64, text: &str, results: Vec<SearchResult>) {
        let count = results.len();
        {
            let mut current = self.results.lock().unwrap();
            if !self.is_current(token) {
                log::debug!("discarding stale results for {text:?}");
                return;
            }
            *current = results;
        }
        self.event_bus
            .emit(SearchResultsReplaced::new(text.to_string(), count));
    }
}
