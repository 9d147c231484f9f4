// src/config.rs
//
// Runtime configuration
//
// Defaults target the public catalog and the platform data directory.
// Every value can be overridden through MULTIVERSO_HUB_* environment variables.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{AppError, AppResult};

pub const DEFAULT_API_BASE_URL: &str = "https://rickandmortyapi.com/api";
pub const DEFAULT_DATABASE_FILE: &str = "multiverso_hub.db";

const ENV_API_URL: &str = "MULTIVERSO_HUB_API_URL";
const ENV_DATA_DIR: &str = "MULTIVERSO_HUB_DATA_DIR";
const ENV_TIMEOUT_SECS: &str = "MULTIVERSO_HUB_TIMEOUT_SECS";
const ENV_EPISODE_PREVIEW: &str = "MULTIVERSO_HUB_EPISODE_PREVIEW";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base endpoint of the character catalog, without trailing slash
    pub api_base_url: String,

    /// Directory holding the local key-value database.
    /// `None` means the platform data directory.
    pub data_dir: Option<PathBuf>,

    pub database_file: String,

    pub request_timeout: Duration,

    /// How many episodes the detail view fetches for a character
    pub episode_preview_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            data_dir: None,
            database_file: DEFAULT_DATABASE_FILE.to_string(),
            request_timeout: Duration::from_secs(30),
            episode_preview_limit: 5,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by whatever MULTIVERSO_HUB_* variables are set.
    /// Unparseable numeric values are ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            config.api_base_url = url.trim().trim_end_matches('/').to_string();
        }

        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|v| !v.trim().is_empty()) {
            config.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.request_timeout = Duration::from_secs(secs),
                _ => log::warn!("Ignoring invalid {}={:?}", ENV_TIMEOUT_SECS, raw),
            }
        }

        if let Some(raw) = lookup(ENV_EPISODE_PREVIEW) {
            match raw.trim().parse::<usize>() {
                Ok(limit) => config.episode_preview_limit = limit,
                Err(_) => log::warn!("Ignoring invalid {}={:?}", ENV_EPISODE_PREVIEW, raw),
            }
        }

        config
    }

    /// Point the database at an explicit directory (tests, portable installs)
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Get the database file path
    ///
    /// Path structure: {DATA_DIR}/multiverso_hub/multiverso_hub.db
    /// when no explicit directory is configured. The directory is created.
    pub fn database_path(&self) -> AppResult<PathBuf> {
        let dir = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()
                .ok_or_else(|| {
                    AppError::Other("Could not determine app data directory".to_string())
                })?
                .join("multiverso_hub"),
        };

        std::fs::create_dir_all(&dir)?;

        Ok(dir.join(&self.database_file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.episode_preview_limit, 5);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (ENV_API_URL, "http://127.0.0.1:9000/api/"),
            (ENV_TIMEOUT_SECS, "3"),
            (ENV_EPISODE_PREVIEW, "2"),
        ]));
        assert_eq!(config.api_base_url, "http://127.0.0.1:9000/api");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.episode_preview_limit, 2);
    }

    #[test]
    fn test_invalid_numbers_keep_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (ENV_TIMEOUT_SECS, "soon"),
            (ENV_EPISODE_PREVIEW, "-1"),
        ]));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.episode_preview_limit, 5);
    }

    #[test]
    fn test_database_path_in_explicit_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::default().with_data_dir(dir.path().join("nested"));
        let path = config.database_path().unwrap();
        assert!(path.ends_with("nested/multiverso_hub.db"));
        assert!(dir.path().join("nested").is_dir());
    }
}
