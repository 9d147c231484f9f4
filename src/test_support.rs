// src/test_support.rs
//
// Shared fixtures for unit tests: on-disk key-value stores, a store that
// always fails, sample catalog records and a minimal HTTP stub server.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::db::{create_connection_pool, get_connection, initialize_database};
use crate::domain::{
    Character, CharacterPage, CharacterStatus, Episode, Gender, LocationRef, PageInfo,
};
use crate::error::{AppError, AppResult};
use crate::repositories::{KeyValueStore, SqliteKeyValueStore};

/// Fresh SQLite-backed store in a temp dir. Keep the `TempDir` alive.
pub fn sqlite_store() -> (TempDir, SqliteKeyValueStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = sqlite_store_at(&dir.path().join("kv.db"));
    (dir, store)
}

/// Open (or reopen, to simulate an app restart) a store over `path`
pub fn sqlite_store_at(path: &Path) -> SqliteKeyValueStore {
    let pool = create_connection_pool(path).unwrap();
    {
        let conn = get_connection(&pool).unwrap();
        initialize_database(&conn).unwrap();
    }
    SqliteKeyValueStore::new(Arc::new(pool))
}

/// Every operation fails with an I/O error
pub struct FailingKeyValueStore;

#[async_trait]
impl KeyValueStore for FailingKeyValueStore {
    async fn get(&self, _key: &str) -> AppResult<Option<String>> {
        Err(AppError::Io(std::io::Error::other("disk unavailable")))
    }

    async fn set(&self, _key: &str, _value: String) -> AppResult<()> {
        Err(AppError::Io(std::io::Error::other("disk unavailable")))
    }

    async fn remove(&self, _keys: &[&str]) -> AppResult<()> {
        Err(AppError::Io(std::io::Error::other("disk unavailable")))
    }
}

pub fn sample_character(id: u32, status: CharacterStatus) -> Character {
    Character {
        id,
        name: format!("Character {}", id),
        status,
        species: "Human".to_string(),
        kind: String::new(),
        gender: Gender::Unknown,
        origin: LocationRef {
            name: "Earth (C-137)".to_string(),
            url: "https://rickandmortyapi.com/api/location/1".to_string(),
        },
        location: LocationRef {
            name: "Citadel of Ricks".to_string(),
            url: "https://rickandmortyapi.com/api/location/3".to_string(),
        },
        image: format!("https://rickandmortyapi.com/api/character/avatar/{}.jpeg", id),
        episodes: (1..=8)
            .map(|n| format!("https://rickandmortyapi.com/api/episode/{}", n))
            .collect(),
        url: format!("https://rickandmortyapi.com/api/character/{}", id),
        created: Utc.with_ymd_and_hms(2017, 11, 4, 18, 48, 46).unwrap(),
    }
}

pub fn sample_episode(id: u32) -> Episode {
    Episode {
        id,
        name: format!("Episode {}", id),
        air_date: "December 2, 2013".to_string(),
        code: format!("S01E{:02}", id),
        characters: vec!["https://rickandmortyapi.com/api/character/1".to_string()],
        url: format!("https://rickandmortyapi.com/api/episode/{}", id),
        created: Utc.with_ymd_and_hms(2017, 11, 10, 12, 56, 33).unwrap(),
    }
}

pub fn sample_page(characters: Vec<Character>, next: Option<&str>) -> CharacterPage {
    CharacterPage {
        info: PageInfo {
            count: 826,
            pages: 42,
            next: next.map(str::to_string),
            prev: None,
        },
        results: characters,
    }
}

/// A throwaway HTTP/1.1 server answering every request through `handler`.
/// Request targets (path + query) are recorded in arrival order.
pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
    handle: JoinHandle<()>,
}

impl StubServer {
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub async fn spawn_stub_server<F>(handler: F) -> StubServer
where
    F: Fn(&str) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let handler = Arc::new(handler);

    let recorded = Arc::clone(&requests);
    let handle = tokio::spawn(async move {
        loop {
            let (mut socket, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => break,
            };
            let handler = Arc::clone(&handler);
            let recorded = Arc::clone(&recorded);

            tokio::spawn(async move {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                loop {
                    match socket.read(&mut chunk).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => {
                            buf.extend_from_slice(&chunk[..n]);
                            if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                                break;
                            }
                        }
                    }
                }

                let head = String::from_utf8_lossy(&buf);
                let target = head
                    .lines()
                    .next()
                    .and_then(|line| line.split_whitespace().nth(1))
                    .unwrap_or("/")
                    .to_string();
                recorded.lock().unwrap().push(target.clone());

                let (status, body) = handler(&target);
                let response = format!(
                    concat!(
                        "HTTP/1.1 {} {}\r\n",
                        "Content-Type: application/json\r\n",
                        "Content-Length: {}\r\n",
                        "Connection: close\r\n\r\n{}"
                    ),
                    status,
                    if status < 400 { "OK" } else { "Error" },
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    StubServer {
        base_url: format!("http://{}/api", addr),
        requests,
        handle,
    }
}
