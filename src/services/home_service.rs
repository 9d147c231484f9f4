// src/services/home_service.rs

use std::sync::Arc;

use serde::Serialize;

use crate::domain::StatusFilter;
use crate::events::telemetry;
use crate::integrations::CharacterCatalog;
use crate::services::connectivity::ConnectivityMonitor;
use crate::services::favorites_service::FavoritesStore;

/// Figures shown on the landing screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeSummary {
    /// Catalog size as reported by the first page; 0 when unavailable
    pub total_characters: u32,
    pub favorites_count: usize,
    pub is_connected: bool,
}

pub struct HomeService {
    catalog: Arc<dyn CharacterCatalog>,
    favorites: Arc<FavoritesStore>,
    connectivity: Arc<ConnectivityMonitor>,
}

impl HomeService {
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

    pub async fn summary(&self) -> HomeSummary {
        telemetry::log_screen_view("Home");

        let total_characters = match self.catalog.list_characters(1, StatusFilter::All).await {
            Ok(page) => page.info.count,
            Err(e) => {
                log::error!("Error loading total characters: {}", e);
                0
            }
        };

        HomeSummary {
            total_characters,
            favorites_count: self.favorites.favorites_count(),
            is_connected: self.connectivity.is_connected(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::events::EventBus;
    use crate::integrations::MockCharacterCatalog;
    use crate::services::storage_service::AppStorage;
    use crate::test_support::{sample_page, FailingKeyValueStore};

    fn service(catalog: MockCharacterCatalog) -> (HomeService, Arc<FavoritesStore>) {
        let bus = Arc::new(EventBus::new());
        let storage = Arc::new(AppStorage::new(Arc::new(FailingKeyValueStore)));
        let favorites = Arc::new(FavoritesStore::new(storage, Arc::clone(&bus)));
        let connectivity = Arc::new(ConnectivityMonitor::new(bus));
        let service = HomeService::new(Arc::new(catalog), Arc::clone(&favorites), connectivity);
        (service, favorites)
    }

    #[tokio::test]
    async fn test_summary_counts() {
        let mut catalog = MockCharacterCatalog::new();
        catalog
            .expect_list_characters()
            .returning(|_, _| Ok(sample_page(Vec::new(), None)));
        let (service, favorites) = service(catalog);
        favorites.add_favorite(1);
        favorites.add_favorite(2);

        let summary = service.summary().await;
        assert_eq!(summary.total_characters, 826);
        assert_eq!(summary.favorites_count, 2);
        assert!(summary.is_connected);
    }

    #[tokio::test]
    async fn test_total_is_zero_when_catalog_unreachable() {
        let mut catalog = MockCharacterCatalog::new();
        catalog.expect_list_characters().returning(|_, _| {
            Err(AppError::HttpStatus {
                status: 503,
                url: "https://rickandmortyapi.com/api/character?page=1".to_string(),
            })
        });
        let (service, _favorites) = service(catalog);

        assert_eq!(service.summary().await.total_characters, 0);
    }
}
