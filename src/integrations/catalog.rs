// src/integrations/catalog.rs
//
// Read-only access to the remote character catalog.
//
// Implementations never retry, never cache and never de-duplicate
// concurrent identical requests. Callers own every failure policy.

use async_trait::async_trait;

use crate::domain::{Character, CharacterId, CharacterPage, Episode, StatusFilter};
use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterCatalog: Send + Sync {
    /// One listing page, optionally filtered by vital status
    async fn list_characters(&self, page: u32, status: StatusFilter) -> AppResult<CharacterPage>;

    async fn get_character_by_id(&self, id: CharacterId) -> AppResult<Character>;

    /// `url` is an absolute episode resource URL as embedded in a character
    async fn get_episode_by_url(&self, url: &str) -> AppResult<Episode>;

    /// Fetch every URL concurrently. Succeeds only if every request succeeds;
    /// results keep the order of `urls`.
    async fn get_multiple_episodes(&self, urls: &[String]) -> AppResult<Vec<Episode>>;

    /// Listing filtered by name substring
    async fn search_characters_by_name(&self, query: &str) -> AppResult<CharacterPage>;
}
