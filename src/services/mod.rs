// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod character_browser_service;
pub mod character_cache_service;
pub mod character_detail_service;
pub mod connectivity;
pub mod data_reset_service;
pub mod favorites_service;
pub mod favorites_view_service;
pub mod home_service;
pub mod storage_service;
pub mod theme_service;

pub use character_browser_service::{CharacterBrowser, CharacterListState};
pub use character_cache_service::CharacterCache;
pub use character_detail_service::{CharacterDetail, CharacterDetailService};
pub use connectivity::ConnectivityMonitor;
pub use data_reset_service::DataResetService;
pub use favorites_service::FavoritesStore;
pub use favorites_view_service::{FavoritesView, FavoritesViewService};
pub use home_service::{HomeService, HomeSummary};
pub use storage_service::AppStorage;
pub use theme_service::ThemeService;
