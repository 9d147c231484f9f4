// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are UI-friendly representations
// - DTOs are simple, serializable structs
// - Conversion FROM domain/service types only (never TO)

use serde::{Deserialize, Serialize};

use crate::domain::{Character, CharacterId, Episode, Gender, Theme};
use crate::services::{CharacterDetail, CharacterListState, FavoritesView, HomeSummary};

// ============================================================================
// CHARACTER DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterDto {
    pub id: CharacterId,
    pub name: String,
    pub status: String,
    pub species: String,
    pub subtype: Option<String>,
    pub gender: Gender,
    pub origin: String,
    pub location: String,
    pub image: String,
    pub episode_count: usize,
    pub created: String,
    pub is_favorite: bool,
}

impl CharacterDto {
    pub fn from_character(character: Character, is_favorite: bool) -> Self {
        Self {
            id: character.id,
            status: character.status.to_string(),
            subtype: character.subtype().map(str::to_string),
            episode_count: character.episodes.len(),
            created: character.created.to_rfc3339(),
            name: character.name,
            species: character.species,
            gender: character.gender,
            origin: character.origin.name,
            location: character.location.name,
            image: character.image,
            is_favorite,
        }
    }
}

impl From<Character> for CharacterDto {
    fn from(character: Character) -> Self {
        Self::from_character(character, false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterListDto {
    pub characters: Vec<CharacterDto>,
    pub current_page: u32,
    pub has_more: bool,
    pub status_filter: String,
    pub search_query: Option<String>,
    pub error: Option<String>,
    pub from_cache: bool,
}

impl CharacterListDto {
    /// `is_favorite` decides the heart on each card
    pub fn from_state(
        state: CharacterListState,
        is_favorite: impl Fn(CharacterId) -> bool,
    ) -> Self {
        Self {
            characters: state
                .characters
                .into_iter()
                .map(|c| {
                    let favorite = is_favorite(c.id);
                    CharacterDto::from_character(c, favorite)
                })
                .collect(),
            current_page: state.current_page,
            has_more: state.has_more,
            status_filter: state.status_filter.to_string(),
            search_query: state.search_query,
            error: state.error,
            from_cache: state.from_cache,
        }
    }
}

// ============================================================================
// EPISODE / DETAIL DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeDto {
    pub id: u32,
    pub name: String,
    pub air_date: String,
    pub code: String,
    pub season: Option<u32>,
}

impl From<Episode> for EpisodeDto {
    fn from(episode: Episode) -> Self {
        Self {
            season: episode.season(),
            id: episode.id,
            name: episode.name,
            air_date: episode.air_date,
            code: episode.code,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterDetailDto {
    pub character: CharacterDto,
    pub episodes: Vec<EpisodeDto>,
}

impl CharacterDetailDto {
    pub fn from_detail(detail: CharacterDetail, is_favorite: bool) -> Self {
        Self {
            character: CharacterDto::from_character(detail.character, is_favorite),
            episodes: detail.episodes.into_iter().map(EpisodeDto::from).collect(),
        }
    }
}

// ============================================================================
// FAVORITES DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoritesDto {
    pub characters: Vec<CharacterDto>,
    pub offline: bool,
}

impl From<FavoritesView> for FavoritesDto {
    fn from(view: FavoritesView) -> Self {
        Self {
            characters: view
                .characters
                .into_iter()
                .map(|c| CharacterDto::from_character(c, true))
                .collect(),
            offline: view.offline,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleFavoriteDto {
    pub character_id: CharacterId,
    pub is_favorite: bool,
    pub favorites_count: usize,
}

// ============================================================================
// SETTINGS / HOME DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeDto {
    pub theme: String,
    pub is_dark: bool,
}

impl From<Theme> for ThemeDto {
    fn from(theme: Theme) -> Self {
        Self {
            theme: theme.as_str().to_string(),
            is_dark: theme == Theme::Dark,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeSummaryDto {
    pub total_characters: u32,
    pub favorites_count: usize,
    pub is_connected: bool,
}

impl From<HomeSummary> for HomeSummaryDto {
    fn from(summary: HomeSummary) -> Self {
        Self {
            total_characters: summary.total_characters,
            favorites_count: summary.favorites_count,
            is_connected: summary.is_connected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearDataDto {
    pub favorites_removed: usize,
}
