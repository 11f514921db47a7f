// src/events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already occurred.
//
// Events carry only the data needed to react. The bus delivers them
// synchronously, so handlers must stay short and non-blocking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

/// Emitted when the presenter commits a new result list. The list is
/// always replaced as a unit; there is no partial-update event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResultsReplaced {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub query: String,
    pub result_count: usize,
}

impl SearchResultsReplaced {
    pub fn new(query: String, result_count: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            query,
            result_count,
        }
    }
}

impl DomainEvent for SearchResultsReplaced {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "SearchResultsReplaced"
    }
}

/// Emitted when a search result is chosen. This is the navigation
/// boundary: the presenter announces the external identifier and the
/// host decides where to go with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieSelected {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub external_id: String,
}

impl MovieSelected {
    pub fn new(external_id: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            external_id,
        }
    }
}

impl DomainEvent for MovieSelected {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "MovieSelected"
    }
}

/// Emitted on every committed transition of the resolution pipeline.
/// Discarded (superseded) transitions never produce this event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionStateChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub external_id: String,
    /// State name: "resolving_id", "resolving_details", "ready",
    /// "no_mapping", "failed"
    pub state: String,
}

impl ResolutionStateChanged {
    pub fn new(external_id: String, state: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            external_id,
            state,
        }
    }
}

impl DomainEvent for ResolutionStateChanged {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "ResolutionStateChanged"
    }
}

/// Emitted when the geolocation resolver settles on a label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationResolved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub label: String,
    /// Which tier produced the label: "ip_lookup" or "default"
    pub source: String,
}

impl LocationResolved {
    pub fn new(label: String, source: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            label,
            source,
        }
    }
}

impl DomainEvent for LocationResolved {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "LocationResolved"
    }
}
