// src/services/character_cache_service.rs
//
// Offline snapshot of the most recently fetched character listing.
// Overwritten wholesale on every successful online fetch; never merged,
// never expired. Read only when the listing cannot come from the network.

use std::sync::Arc;

use crate::domain::Character;
use crate::events::{CharactersCached, EventBus};
use crate::services::storage_service::AppStorage;

pub struct CharacterCache {
    storage: Arc<AppStorage>,
    event_bus: Arc<EventBus>,
}

impl CharacterCache {
    pub fn new(storage: Arc<AppStorage>, event_bus: Arc<EventBus>) -> Self {
        Self { storage, event_bus }
    }

    /// Replace the snapshot. Failures are logged by the storage layer.
    pub async fn cache_characters(&self, characters: &[Character]) {
        self.storage.cache_characters(characters).await;
        self.event_bus.emit(CharactersCached::new(characters.len()));
    }

    /// Last cached list; empty when nothing (readable) was cached
    pub async fn get_cached_characters(&self) -> Vec<Character> {
        self.storage.get_cached_characters().await
    }
}
