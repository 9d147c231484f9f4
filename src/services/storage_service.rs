// src/services/storage_service.rs
//
// Typed, best-effort access to the local key-value store.
//
// FAILURE POLICY:
// - Writes log and swallow errors
// - Reads degrade to a safe default (empty list, light theme)
// - clear_all_data is the exception: it reports failure to its caller

use std::sync::Arc;

use crate::domain::{Character, CharacterId, Theme};
use crate::error::AppResult;
use crate::repositories::{KeyValueStore, StorageKey};

pub struct AppStorage {
    store: Arc<dyn KeyValueStore>,
}

impl AppStorage {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    // ------------------------------------------------------------------------
    // Favorites
    // ------------------------------------------------------------------------

    pub async fn save_favorites(&self, favorites: &[CharacterId]) {
        match serde_json::to_string(favorites) {
            Ok(json) => self.write(StorageKey::Favorites, json).await,
            Err(e) => log::error!("Error saving favorites: {}", e),
        }
    }

    pub async fn get_favorites(&self) -> Vec<CharacterId> {
        self.read_json(StorageKey::Favorites).await.unwrap_or_default()
    }

    // ------------------------------------------------------------------------
    // Theme
    // ------------------------------------------------------------------------

    pub async fn save_theme(&self, theme: Theme) {
        self.write(StorageKey::Theme, theme.as_str().to_string()).await;
    }

    pub async fn get_theme(&self) -> Theme {
        match self.store.get(StorageKey::Theme.as_str()).await {
            Ok(Some(value)) => Theme::from_stored(&value),
            Ok(None) => Theme::default(),
            Err(e) => {
                log::error!("Error getting theme: {}", e);
                Theme::default()
            }
        }
    }

    // ------------------------------------------------------------------------
    // Offline character snapshot
    // ------------------------------------------------------------------------

    pub async fn cache_characters(&self, characters: &[Character]) {
        match serde_json::to_string(characters) {
            Ok(json) => self.write(StorageKey::CachedCharacters, json).await,
            Err(e) => log::error!("Error caching characters: {}", e),
        }
    }

    pub async fn get_cached_characters(&self) -> Vec<Character> {
        self.read_json(StorageKey::CachedCharacters)
            .await
            .unwrap_or_default()
    }

    // ------------------------------------------------------------------------
    // Wipe
    // ------------------------------------------------------------------------

    /// Remove every record this application persists, in one batch call
    pub async fn clear_all_data(&self) -> AppResult<()> {
        let keys: Vec<&str> = StorageKey::ALL.iter().map(|k| k.as_str()).collect();

        match self.store.remove(&keys).await {
            Ok(()) => {
                log::info!("All app data cleared successfully");
                Ok(())
            }
            Err(e) => {
                log::error!("Error clearing data: {}", e);
                Err(e)
            }
        }
    }

    // ------------------------------------------------------------------------
    // INTERNAL
    // ------------------------------------------------------------------------

    async fn write(&self, key: StorageKey, value: String) {
        if let Err(e) = self.store.set(key.as_str(), value).await {
            log::error!("Error writing {}: {}", key.as_str(), e);
        }
    }

    /// `None` when absent, unreadable or undecodable
    async fn read_json<T>(&self, key: StorageKey) -> Option<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let raw = match self.store.get(key.as_str()).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::error!("Error reading {}: {}", key.as_str(), e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Discarding undecodable {}: {}", key.as_str(), e);
                None
            }
        }
    }
}
