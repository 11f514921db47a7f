// src/services/search_service.rs
//
// Catalog Search Client.
//
// Policy layer over the search gateway:
// - empty query short-circuits without touching the network
// - gateway failures degrade to an empty list (logged, never thrown)
//
// The service is stateless, so concurrent calls for different queries are
// safe; ordering between them is the presenter's problem.

use std::sync::Arc;

use crate::domain::SearchResult;
use crate::gateways::SearchGateway;

pub struct SearchService {
    gateway: Arc<dyn SearchGateway>,
}

impl SearchService {
    pub fn new(gateway: Arc<dyn SearchGateway>) -> Self {
        Self { gateway }
    }

    /// Search the catalog by free-text title. Always returns a valid
    /// (possibly empty) list; never fails.
    pub async fn search(&self, query: &str) -> Vec<SearchResult> {
        if query.is_empty() {
            return Vec::new();
        }

        match self.gateway.search_by_title(query).await {
            Ok(results) => results,
            Err(e) => {
                log::warn!("search for {query:?} failed: {e}");
                Vec::new()
            }
        }
    }
}
