// src/services/character_detail_service.rs
//
// Detail view: one character plus a preview of the episodes it appears in.
// The episode preview is all-or-nothing; any failed episode fails the load.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::{Character, CharacterId, Episode};
use crate::error::AppResult;
use crate::events::telemetry;
use crate::integrations::CharacterCatalog;

pub const DETAIL_ERROR: &str = "Failed to load character";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterDetail {
    pub character: Character,
    /// First `episode_preview_limit` episodes, in the character's order
    pub episodes: Vec<Episode>,
}

pub struct CharacterDetailService {
    catalog: Arc<dyn CharacterCatalog>,
    episode_preview_limit: usize,
}

impl CharacterDetailService {
    pub fn new(catalog: Arc<dyn CharacterCatalog>, episode_preview_limit: usize) -> Self {
        Self {
            catalog,
            episode_preview_limit,
        }
    }

    pub async fn load(&self, id: CharacterId) -> AppResult<CharacterDetail> {
        let result = self.fetch(id).await;

        if let Err(e) = &result {
            telemetry::log_error(DETAIL_ERROR, Some(&e.to_string()));
        }

        result
    }

    async fn fetch(&self, id: CharacterId) -> AppResult<CharacterDetail> {
        let character = self.catalog.get_character_by_id(id).await?;
        telemetry::log_screen_view(&format!("Character Detail: {}", character.name));

        let preview: Vec<String> = character
            .episodes
            .iter()
            .take(self.episode_preview_limit)
            .cloned()
            .collect();

        let episodes = if preview.is_empty() {
            Vec::new()
        } else {
            self.catalog.get_multiple_episodes(&preview).await?
        };

        Ok(CharacterDetail {
            character,
            episodes,
        })
    }
}
