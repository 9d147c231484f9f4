// src/integrations/rick_and_morty/client.rs
//
// Rick & Morty REST API client
//
// ARCHITECTURE:
// - Plain HTTP GET against a fixed base endpoint
// - Maps JSON straight into domain records (the API is the source of truth)
// - Every call is logged as an `api_call` telemetry event
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - No retries, no caching, no request de-duplication
// - Non-success status is an error; the caller decides what to do with it

use std::time::Duration;

use async_trait::async_trait;
use futures::future::try_join_all;
use reqwest::{header, Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::config::AppConfig;
use crate::domain::{Character, CharacterId, CharacterPage, Episode, StatusFilter};
use crate::error::{AppError, AppResult};
use crate::events::telemetry;
use crate::integrations::catalog::CharacterCatalog;

/// Rick & Morty API Client
pub struct RickAndMortyClient {
    base_url: String,
    http_client: Client,
}

impl RickAndMortyClient {
    /// Create a client for `base_url` (e.g. `https://rickandmortyapi.com/api`)
    pub fn new(base_url: &str, timeout: Duration) -> AppResult<Self> {
        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        Self::new(&config.api_base_url, config.request_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn character_endpoint(&self) -> String {
        format!("{}/character", self.base_url)
    }

    // ========================================================================
    // INTERNAL: request execution
    // ========================================================================

    /// Send, check status, decode, and record the outcome
    async fn execute<T>(&self, endpoint: &str, request: RequestBuilder) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let result = Self::fetch_json(request).await;

        telemetry::log_api_call(endpoint, result.is_ok());
        if let Err(e) = &result {
            log::error!("Error fetching {}: {}", endpoint, e);
        }

        result
    }

    async fn fetch_json<T>(request: RequestBuilder) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let response = request
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::HttpStatus {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl CharacterCatalog for RickAndMortyClient {
    async fn list_characters(&self, page: u32, status: StatusFilter) -> AppResult<CharacterPage> {
        let mut request = self
            .http_client
            .get(self.character_endpoint())
            .query(&[("page", page)]);

        if let Some(status) = status.query_value() {
            request = request.query(&[("status", status)]);
        }

        self.execute("character", request).await
    }

    async fn get_character_by_id(&self, id: CharacterId) -> AppResult<Character> {
        let request = self
            .http_client
            .get(format!("{}/{}", self.character_endpoint(), id));

        self.execute(&format!("character/{}", id), request).await
    }

    async fn get_episode_by_url(&self, url: &str) -> AppResult<Episode> {
        let request = self.http_client.get(url);

        self.execute(url, request).await
    }

    async fn get_multiple_episodes(&self, urls: &[String]) -> AppResult<Vec<Episode>> {
        let episodes = try_join_all(urls.iter().map(|url| self.get_episode_by_url(url))).await;

        if let Err(e) = &episodes {
            log::error!("Error fetching multiple episodes ({} requested): {}", urls.len(), e);
        }

        episodes
    }

    async fn search_characters_by_name(&self, query: &str) -> AppResult<CharacterPage> {
        let request = self
            .http_client
            .get(self.character_endpoint())
            .query(&[("name", query)]);

        self.execute("character?name", request).await
    }
}
