// src/services/favorites_view_service.rs
//
// Full records for every favorited character, fetched concurrently.
// All-or-nothing: one failed fetch yields an empty view.

use std::sync::Arc;

use futures::future::try_join_all;
use serde::Serialize;

use crate::domain::Character;
use crate::events::telemetry;
use crate::integrations::CharacterCatalog;
use crate::services::connectivity::ConnectivityMonitor;
use crate::services::favorites_service::FavoritesStore;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FavoritesView {
    pub characters: Vec<Character>,
    /// Favorites exist but could not be fetched while offline
    pub offline: bool,
}

pub struct FavoritesViewService {
    catalog: Arc<dyn CharacterCatalog>,
    favorites: Arc<FavoritesStore>,
    connectivity: Arc<ConnectivityMonitor>,
}

impl FavoritesViewService {
    pub fn new(
        catalog: Arc<dyn CharacterCatalog>,
        favorites: Arc<FavoritesStore>,
        connectivity: Arc<ConnectivityMonitor>,
    ) -> Self {
        Self {
            catalog,
            favorites,
            connectivity,
        }
    }

    pub async fn load(&self) -> FavoritesView {
        telemetry::log_screen_view("Favorites");

        let ids = self.favorites.favorite_ids();
        if ids.is_empty() {
            return FavoritesView::default();
        }

        if !self.connectivity.is_connected() {
            return FavoritesView {
                characters: Vec::new(),
                offline: true,
            };
        }

        let fetches = ids.iter().map(|&id| self.catalog.get_character_by_id(id));
        match try_join_all(fetches).await {
            Ok(characters) => FavoritesView {
                characters,
                offline: false,
            },
            Err(e) => {
                telemetry::log_error("Error loading favorite characters", Some(&e.to_string()));
                FavoritesView::default()
            }
        }
    }
}
