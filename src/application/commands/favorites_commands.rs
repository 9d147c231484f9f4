// src/application/commands/favorites_commands.rs

use crate::application::dto::{FavoritesDto, ToggleFavoriteDto};
use crate::application::state::AppState;
use crate::domain::CharacterId;

/// Flip membership of one character. Never fails: persistence is
/// best-effort and the in-memory set is authoritative.
pub async fn toggle_favorite(
    state: &AppState,
    character_id: CharacterId,
) -> Result<ToggleFavoriteDto, String> {
    let is_favorite = state.favorites.toggle_favorite(character_id);

    Ok(ToggleFavoriteDto {
        character_id,
        is_favorite,
        favorites_count: state.favorites.favorites_count(),
    })
}

pub async fn list_favorites(state: &AppState) -> Result<FavoritesDto, String> {
    Ok(state.favorites_view.load().await.into())
}
