// src/services/resolution_service.rs
//
// Resolution Pipeline - the two-hop lookup as a supervised state machine.
//
//   Idle --resolve--> ResolvingId --mapped--> ResolvingDetails --> Ready
//                         |                        |
//                     no mapping               fetch failure
//                         v                        v
//                     NoMapping                 Failed
//
// Each call to `resolve` starts a new pipeline instance keyed by its
// external identifier and stamped with an epoch token. Every transition
// commits under one lock and compares its token against the current
// epoch; a stale instance's commit is discarded, so a late-arriving
// result can never overwrite the state of a newer identifier.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::{ResolutionFailure, ResolutionState, ResolvedIdentifier};
use crate::error::AppError;
use crate::events::{EventBus, ResolutionStateChanged};
use crate::gateways::{CrossReferenceGateway, DetailsGateway};

struct CurrentResolution {
    external_id: Option<String>,
    state: ResolutionState,
}

pub struct ResolutionService {
    cross_reference: Arc<dyn CrossReferenceGateway>,
    details: Arc<dyn DetailsGateway>,
    event_bus: Arc<EventBus>,
    epoch: AtomicU64,
    current: Mutex<CurrentResolution>,
}

impl ResolutionService {
    pub fn new(
        cross_reference: Arc<dyn CrossReferenceGateway>,
        details: Arc<dyn DetailsGateway>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            cross_reference,
            details,
            event_bus,
            epoch: AtomicU64::new(0),
            current: Mutex::new(CurrentResolution {
                external_id: None,
                state: ResolutionState::Idle,
            }),
        }
    }

    /// Run the pipeline for one external identifier.
    ///
    /// Returns the terminal state this instance reached, or `None` when a
    /// newer identifier superseded it mid-flight (the result was
    /// discarded; `state()` belongs to the newer instance).
    pub async fn resolve(&self, external_id: &str) -> Option<ResolutionState> {
        let token = self.begin(external_id);

        let mapped = match self.cross_reference.find_by_external_id(external_id).await {
            Ok(mapped) => mapped,
            Err(e) => {
                // Observed upstream behavior: a bridge failure reads as
                // "no mapping" rather than a pipeline error
                log::warn!("cross-reference lookup for {external_id} failed: {e}");
                None
            }
        };

        let resolved = match mapped {
            Some(internal_id) => ResolvedIdentifier::mapped(external_id.to_string(), internal_id),
            None => ResolvedIdentifier::unmapped(external_id.to_string()),
        };

        let Some(internal_id) = resolved.internal_id else {
            return self.commit(token, external_id, ResolutionState::NoMapping);
        };

        self.commit(token, external_id, ResolutionState::ResolvingDetails)?;

        let state = match self.details.fetch_movie(&internal_id).await {
            Ok(record) => ResolutionState::Ready(record),
            Err(AppError::NotFound) => {
                log::warn!("no details record for internal id {internal_id}");
                ResolutionState::Failed(ResolutionFailure::not_found(&internal_id))
            }
            Err(AppError::Parse(e)) => {
                log::warn!("details payload for {internal_id} malformed: {e}");
                ResolutionState::Failed(ResolutionFailure::parse(e.to_string()))
            }
            Err(e) => {
                log::warn!("details fetch for {internal_id} failed: {e}");
                ResolutionState::Failed(ResolutionFailure::transport(e.to_string()))
            }
        };

        self.commit(token, external_id, state)
    }

    /// Authoritative state snapshot for rendering.
    pub fn state(&self) -> ResolutionState {
        self.current.lock().unwrap().state.clone()
    }

    /// The external identifier currently driving the pipeline.
    pub fn current_external_id(&self) -> Option<String> {
        self.current.lock().unwrap().external_id.clone()
    }

    /// Start a new pipeline instance: re-key to this identifier, bump the
    /// epoch (invalidating any in-flight instance), enter ResolvingId.
    fn begin(&self, external_id: &str) -> u64 {
        let token;
        {
            let mut current = self.current.lock().unwrap();
            token = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
            current.external_id = Some(external_id.to_string());
            current.state = ResolutionState::ResolvingId;
        }
        self.event_bus.emit(ResolutionStateChanged::new(
            external_id.to_string(),
            ResolutionState::ResolvingId.name().to_string(),
        ));
        token
    }

    /// Commit a transition if this instance is still authoritative.
    /// Returns `None` when the epoch moved on - the transition (and any
    /// record it carried) is discarded.
    fn commit(
        &self,
        token: u64,
        external_id: &str,
        state: ResolutionState,
    ) -> Option<ResolutionState> {
        {
            let mut current = self.current.lock().unwrap();
            if self.epoch.load(Ordering::SeqCst) != token {
                log::debug!("discarding stale resolution transition for {external_id}");
                return None;
            }
            current.state = state.clone();
        }
        self.event_bus.emit(ResolutionStateChanged::new(
            external_id.to_string(),
            state.name().to_string(),
        ));
        Some(state)
    }
}
