// src/events/mod.rs
//
// Internal Event System - Public API
//
// The EventHandler type alias stays internal to the bus module.

pub mod bus;
pub mod types;

pub use bus::{EventBus, EventLogEntry};
pub use types::DomainEvent;

pub use types::{LocationResolved, MovieSelected, ResolutionStateChanged, SearchResultsReplaced};

/// Initialize a new event bus
pub fn create_event_bus() -> EventBus {
    EventBus::new()
}
