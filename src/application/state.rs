// src/application/state.rs

use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::{
    create_connection_pool, get_connection, initialize_database, verify_database_integrity,
};
use crate::error::AppResult;
use crate::events::{create_event_bus, EventBus};
use crate::integrations::{CharacterCatalog, RickAndMortyClient};
use crate::repositories::{KeyValueStore, SqliteKeyValueStore};
use crate::services::{
    AppStorage, CharacterBrowser, CharacterCache, CharacterDetailService, ConnectivityMonitor,
    DataResetService, FavoritesStore, FavoritesViewService, HomeService, ThemeService,
};

/// Everything the command layer needs, wired once at startup.
/// All fields are Arc-wrapped for sharing across concurrent commands.
pub struct AppState {
    pub config: AppConfig,
    pub event_bus: Arc<EventBus>,
    pub storage: Arc<AppStorage>,
    pub connectivity: Arc<ConnectivityMonitor>,
    pub favorites: Arc<FavoritesStore>,
    pub theme: Arc<ThemeService>,
    pub character_browser: Arc<CharacterBrowser>,
    pub character_detail: Arc<CharacterDetailService>,
    pub favorites_view: Arc<FavoritesViewService>,
    pub home: Arc<HomeService>,
    pub data_reset: Arc<DataResetService>,
}

impl AppState {
    /// Open local storage, build the API client and services, and load the
    /// persisted favorites and theme. Must run inside a tokio runtime.
    pub async fn initialize(config: AppConfig) -> AppResult<Self> {
        let catalog: Arc<dyn CharacterCatalog> =
            Arc::new(RickAndMortyClient::from_config(&config)?);
        Self::with_catalog(config, catalog).await
    }

    /// Same as [`initialize`](Self::initialize) with a caller-supplied catalog
    pub async fn with_catalog(
        config: AppConfig,
        catalog: Arc<dyn CharacterCatalog>,
    ) -> AppResult<Self> {
        // 1. INFRASTRUCTURE
        let db_path = config.database_path()?;
        let pool = Arc::new(create_connection_pool(&db_path)?);
        {
            let conn = get_connection(&pool)?;
            initialize_database(&conn)?;
            verify_database_integrity(&conn)?;
        }
        log::info!("Local storage ready at {}", db_path.display());

        let event_bus = Arc::new(create_event_bus());
        let store: Arc<dyn KeyValueStore> = Arc::new(SqliteKeyValueStore::new(pool));
        let storage = Arc::new(AppStorage::new(store));

        // 2. SERVICES
        let connectivity = Arc::new(ConnectivityMonitor::new(Arc::clone(&event_bus)));
        let favorites = Arc::new(FavoritesStore::new(
            Arc::clone(&storage),
            Arc::clone(&event_bus),
        ));
        let theme = Arc::new(ThemeService::new(Arc::clone(&storage), Arc::clone(&event_bus)));
        let cache = Arc::new(CharacterCache::new(Arc::clone(&storage), Arc::clone(&event_bus)));

        let character_browser = Arc::new(CharacterBrowser::new(
            Arc::clone(&catalog),
            cache,
            Arc::clone(&connectivity),
        ));
        let character_detail = Arc::new(CharacterDetailService::new(
            Arc::clone(&catalog),
            config.episode_preview_limit,
        ));
        let favorites_view = Arc::new(FavoritesViewService::new(
            Arc::clone(&catalog),
            Arc::clone(&favorites),
            Arc::clone(&connectivity),
        ));
        let home = Arc::new(HomeService::new(
            catalog,
            Arc::clone(&favorites),
            Arc::clone(&connectivity),
        ));
        let data_reset = Arc::new(DataResetService::new(
            Arc::clone(&storage),
            Arc::clone(&favorites),
            Arc::clone(&theme),
            Arc::clone(&event_bus),
        ));

        // 3. HYDRATION
        let saved_theme = theme.hydrate().await;
        let favorite_count = favorites.hydrate().await;
        log::info!("Restored {} favorite(s), theme {}", favorite_count, saved_theme);

        Ok(Self {
            config,
            event_bus,
            storage,
            connectivity,
            favorites,
            theme,
            character_browser,
            character_detail,
            favorites_view,
            home,
            data_reset,
        })
    }
}
