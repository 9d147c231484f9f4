// src/services/data_reset_service.rs
//
// "Clear all data": wipe every persisted record, then bring in-memory state
// back to first-launch defaults.
//
// ORDER MATTERS:
// 1. flush queued favorites writes (a late write would resurrect the set)
// 2. wipe storage (on failure nothing in memory is touched)
// 3. reset the favorites state
// 4. theme back to light

use std::sync::Arc;

use serde_json::{json, Map};

use crate::domain::Theme;
use crate::error::AppResult;
use crate::events::telemetry;
use crate::events::{DataCleared, EventBus};
use crate::services::favorites_service::FavoritesStore;
use crate::services::storage_service::AppStorage;
use crate::services::theme_service::ThemeService;

pub struct DataResetService {
    storage: Arc<AppStorage>,
    favorites: Arc<FavoritesStore>,
    theme: Arc<ThemeService>,
    event_bus: Arc<EventBus>,
}

impl DataResetService {
    pub fn new(
        storage: Arc<AppStorage>,
        favorites: Arc<FavoritesStore>,
        theme: Arc<ThemeService>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            storage,
            favorites,
            theme,
            event_bus,
        }
    }

    /// Returns how many favorites were dropped
    pub async fn clear_all_data(&self) -> AppResult<usize> {
        self.favorites.flush().await;

        if let Err(e) = self.storage.clear_all_data().await {
            telemetry::log_error("Error clearing data", Some(&e.to_string()));
            return Err(e);
        }

        let removed = self.favorites.favorites_count();
        self.favorites.reset_favorites_state();
        self.theme.set_theme(Theme::Light).await;

        let mut details = Map::new();
        details.insert("favorites_removed".to_string(), json!(removed));
        telemetry::log_event("data_cleared", details);

        self.event_bus.emit(DataCleared::new(removed));
        Ok(removed)
    }
}
