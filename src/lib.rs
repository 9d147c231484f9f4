// src/lib.rs
// Multiverso Hub - Offline-friendly client core for the Rick & Morty catalog
//
// Architecture:
// - Domain-centric: records, favorites transitions and theme live in `domain`
// - Event-driven: services announce state changes on an in-process bus
// - Local-first: favorites, theme and the last character list survive restarts
// - Remote catalog is read-only and reached through one trait seam
// - Application Layer: UI boundary (commands, DTOs, error responses)

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod integrations;

#[cfg(test)]
mod test_support;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    reduce,
    validate_favorite_set,
    // Character
    Character,
    CharacterId,
    CharacterPage,
    CharacterStatus,
    // Episode
    Episode,
    // Favorites
    FavoriteSet,
    FavoritesCommand,
    Gender,
    LocationRef,
    PageInfo,
    StatusFilter,
    // Settings
    Theme,
};

// ============================================================================
// PUBLIC API - Errors & Config
// ============================================================================

pub use config::AppConfig;
pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    CharactersCached,
    ConnectivityChanged,
    DataCleared,
    DomainEvent,
    EventBus,
    EventLogEntry,
    FavoritesChanged,
    TelemetryEvent,
    ThemeChanged,
};

// ============================================================================
// PUBLIC API - Storage
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool};
pub use repositories::{KeyValueStore, SqliteKeyValueStore, StorageKey};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    AppStorage,
    CharacterBrowser,
    CharacterCache,
    CharacterDetail,
    CharacterDetailService,
    CharacterListState,
    ConnectivityMonitor,
    DataResetService,
    FavoritesStore,
    FavoritesView,
    FavoritesViewService,
    HomeService,
    HomeSummary,
    ThemeService,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{AppState, ErrorResponse, ErrorType};

pub use application::commands;
pub use application::dto;

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::{CharacterCatalog, RickAndMortyClient};
