// src/repositories/key_value_repository.rs
//
// Local key-value persistence
//
// The store is an opaque asynchronous map of text values. Typed access and
// the "best-effort" failure policy live in services::storage_service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use crate::db::{get_connection, ConnectionPool};
use crate::error::{AppError, AppResult};

/// Prefix shared by every key this application writes
pub const KEY_NAMESPACE: &str = "@multiverso_hub:";

/// The records the application persists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Favorites,
    Theme,
    CachedCharacters,
}

impl StorageKey {
    pub const ALL: [StorageKey; 3] = [
        StorageKey::Favorites,
        StorageKey::Theme,
        StorageKey::CachedCharacters,
    ];

    /// Fully namespaced key
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Favorites => "@multiverso_hub:favorites",
            StorageKey::Theme => "@multiverso_hub:theme",
            StorageKey::CachedCharacters => "@multiverso_hub:cached_characters",
        }
    }
}

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// `None` when the key was never set or has been removed
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    async fn set(&self, key: &str, value: String) -> AppResult<()>;

    /// Remove every key, one at a time. All keys are attempted even after a
    /// failure; nothing is rolled back. Returns the first error seen.
    async fn remove(&self, keys: &[&str]) -> AppResult<()>;
}

pub struct SqliteKeyValueStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteKeyValueStore {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Run blocking SQLite work off the async executor
    async fn with_connection<T, F>(&self, work: F) -> AppResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&rusqlite::Connection) -> AppResult<T> + Send + 'static,
    {
        let pool = Arc::clone(&self.pool);
        tokio::task::spawn_blocking(move || {
            let conn = get_connection(&pool)?;
            work(&conn)
        })
        .await?
    }
}

#[async_trait]
impl KeyValueStore for SqliteKeyValueStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let key = key.to_string();
        self.with_connection(move |conn| {
            conn.query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(AppError::Database)
        })
        .await
    }

    async fn set(&self, key: &str, value: String) -> AppResult<()> {
        let key = key.to_string();
        self.with_connection(move |conn| {
            conn.execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE
                 SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, Utc::now().to_rfc3339()],
            )?;
            Ok(())
        })
        .await
    }

    async fn remove(&self, keys: &[&str]) -> AppResult<()> {
        let keys: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        self.with_connection(move |conn| {
            let mut first_error = None;
            for key in &keys {
                if let Err(e) = conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key]) {
                    log::warn!("Failed to remove key {}: {}", key, e);
                    first_error.get_or_insert(AppError::Database(e));
                }
            }
            match first_error {
                Some(err) => Err(err),
                None => Ok(()),
            }
        })
        .await
    }
}
