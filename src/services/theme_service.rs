// src/services/theme_service.rs
//
// Light/dark preference. Persisted on every change; defaults to light.

use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::Theme;
use crate::events::telemetry;
use crate::events::{EventBus, ThemeChanged};
use crate::services::storage_service::AppStorage;

pub struct ThemeService {
    current: RwLock<Theme>,
    storage: Arc<AppStorage>,
    event_bus: Arc<EventBus>,
}

impl ThemeService {
    pub fn new(storage: Arc<AppStorage>, event_bus: Arc<EventBus>) -> Self {
        Self {
            current: RwLock::new(Theme::default()),
            storage,
            event_bus,
        }
    }

    pub fn current(&self) -> Theme {
        *self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_dark(&self) -> bool {
        self.current() == Theme::Dark
    }

    /// Load the saved preference
    pub async fn hydrate(&self) -> Theme {
        let saved = self.storage.get_theme().await;
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = saved;
        saved
    }

    pub async fn set_theme(&self, mode: Theme) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = mode;
        self.storage.save_theme(mode).await;
        telemetry::log_theme_change(mode.as_str());
        self.event_bus.emit(ThemeChanged::new(mode));
    }

    pub async fn toggle_theme(&self) -> Theme {
        let next = self.current().toggled();
        self.set_theme(next).await;
        next
    }
}
