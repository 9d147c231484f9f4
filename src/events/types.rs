// src/events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{CharacterId, Theme};

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// FAVORITES EVENTS
// ============================================================================

/// Emitted after every change of the in-memory favorite set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoritesChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    /// Full set after the change, in display order
    pub favorite_ids: Vec<CharacterId>,
    /// Name of the command that produced the change
    pub command: String,
}

impl FavoritesChanged {
    pub fn new(favorite_ids: Vec<CharacterId>, command: &str) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            favorite_ids,
            command: command.to_string(),
        }
    }
}

impl DomainEvent for FavoritesChanged {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "FavoritesChanged" }
}

// ============================================================================
// SETTINGS EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub theme: Theme,
}

impl ThemeChanged {
    pub fn new(theme: Theme) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            theme,
        }
    }
}

impl DomainEvent for ThemeChanged {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ThemeChanged" }
}

/// Emitted when every persisted record was wiped and in-memory state reset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataCleared {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub favorites_removed: usize,
}

impl DataCleared {
    pub fn new(favorites_removed: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            favorites_removed,
        }
    }
}

impl DomainEvent for DataCleared {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "DataCleared" }
}

// ============================================================================
// CONNECTIVITY / CACHE EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectivityChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub connected: bool,
}

impl ConnectivityChanged {
    pub fn new(connected: bool) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            connected,
        }
    }
}

impl DomainEvent for ConnectivityChanged {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ConnectivityChanged" }
}

/// Emitted when the offline snapshot was overwritten
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharactersCached {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub count: usize,
}

impl CharactersCached {
    pub fn new(count: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            count,
        }
    }
}

impl DomainEvent for CharactersCached {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "CharactersCached" }
}
