// src/events/mod.rs
//
// Internal Event System - Public API
//
// Handler boxing stays private to the bus; only typed subscribe/emit are public.

pub mod bus;
pub mod types;

pub use bus::{EventBus, EventLogEntry};

pub use types::{
    CategoryRefreshFailed, CategoryRefreshed, DomainEvent, FavouriteChanged, MovieDetailsCached,
};

/// Initialize a new event bus
pub fn create_event_bus() -> EventBus {
    EventBus::new()
}
