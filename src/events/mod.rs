// src/events/mod.rs
//
// Internal Event System - Public API
//
// CRITICAL: EventHandler is INTERNAL and must NOT be exported

pub mod bus;
pub mod telemetry;
pub mod types;

pub use types::{
    CharactersCached, ConnectivityChanged, DataCleared, DomainEvent, FavoritesChanged,
    ThemeChanged,
};

pub use bus::{EventBus, EventLogEntry};

pub use telemetry::TelemetryEvent;

/// Initialize a new event bus
pub fn create_event_bus() -> EventBus {
    EventBus::new()
}
