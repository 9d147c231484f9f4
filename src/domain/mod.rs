// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod character;
pub mod episode;
pub mod favorites;
pub mod theme;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Character Domain (remote, read-only)
pub use character::{
    Character, CharacterId, CharacterPage, CharacterStatus, Gender, LocationRef, PageInfo,
    StatusFilter,
};

// Episode Domain (remote, read-only)
pub use episode::Episode;

// Favorites Domain (local)
pub use favorites::{reduce, validate_favorite_set, FavoriteSet, FavoritesCommand};

// Theme Setting (local)
pub use theme::Theme;

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
