use super::entity::FavoriteSet;
use crate::domain::{DomainError, DomainResult};

/// Validates all FavoriteSet invariants
pub fn validate_favorite_set(set: &FavoriteSet) -> DomainResult<()> {
    validate_uniqueness(set)?;
    Ok(())
}

/// No id may appear twice
fn validate_uniqueness(set: &FavoriteSet) -> DomainResult<()> {
    let ids = set.ids();
    for (idx, id) in ids.iter().enumerate() {
        if ids[..idx].contains(id) {
            return Err(DomainError::InvariantViolation(format!(
                "Character {} appears more than once in favorites",
                id
            )));
        }
    }
    Ok(())
}
