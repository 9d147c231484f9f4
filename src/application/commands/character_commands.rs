// src/application/commands/character_commands.rs
//
// Character listing and detail commands

use crate::application::dto::{CharacterDetailDto, CharacterListDto};
use crate::application::error_handling::{ErrorResponse, ToErrorResponse};
use crate::application::state::AppState;
use crate::domain::{CharacterId, StatusFilter};
use crate::services::CharacterListState;

fn list_dto(state: &AppState, list: CharacterListState) -> CharacterListDto {
    CharacterListDto::from_state(list, |id| state.favorites.is_favorite(id))
}

/// First page (or the offline snapshot)
pub async fn list_characters(state: &AppState) -> Result<CharacterListDto, String> {
    let list = state.character_browser.load_initial().await.to_error_response()?;
    Ok(list_dto(state, list))
}

/// Next page of the current listing
pub async fn load_more(state: &AppState) -> Result<CharacterListDto, String> {
    let list = state.character_browser.load_more().await.to_error_response()?;
    Ok(list_dto(state, list))
}

/// `status` is one of `all`, `alive`, `dead`, `unknown`
pub async fn filter_characters(state: &AppState, status: &str) -> Result<CharacterListDto, String> {
    let filter: StatusFilter = status
        .parse()
        .map_err(|e: String| ErrorResponse::validation(e).to_json())?;

    let list = state
        .character_browser
        .apply_status_filter(filter)
        .await
        .to_error_response()?;
    Ok(list_dto(state, list))
}

pub async fn search_characters(state: &AppState, query: &str) -> Result<CharacterListDto, String> {
    let list = state.character_browser.search(query).await.to_error_response()?;
    Ok(list_dto(state, list))
}

pub async fn get_character_detail(
    state: &AppState,
    character_id: CharacterId,
) -> Result<CharacterDetailDto, String> {
    let detail = state
        .character_detail
        .load(character_id)
        .await
        .to_error_response()?;

    let is_favorite = state.favorites.is_favorite(character_id);
    Ok(CharacterDetailDto::from_detail(detail, is_favorite))
}
