//! Character Invariants:
//!
//! 1. `id` is assigned by the remote catalog and never changes
//! 2. Records are never edited locally
//! 3. Wire field names (`type`, `episode`) are preserved on serialization,
//!    so cached snapshots decode exactly like fresh responses

pub mod entity;

pub use entity::{
    Character, CharacterId, CharacterPage, CharacterStatus, Gender, LocationRef, PageInfo,
    StatusFilter,
};
