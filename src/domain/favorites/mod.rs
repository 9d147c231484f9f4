//! Critical Favorites Invariants:
//!
//! 1. No character id appears twice
//! 2. Insertion order is preserved for display
//! 3. Every change goes through `reduce`, a pure function of (state, command)
//! 4. The set holds ids only; character records are fetched separately

pub mod entity;
pub mod invariants;

pub use entity::{reduce, FavoriteSet, FavoritesCommand};
pub use invariants::validate_favorite_set;
