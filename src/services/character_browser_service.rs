// src/services/character_browser_service.rs
//
// Character listing orchestration: first page, infinite scroll, status
// filter, name search, and the offline fallback to the cached snapshot.
//
// RULES:
// - Network failures become user-visible error text in the list state
// - Only the unfiltered first page and its appended pages are cached
// - Every initial load / filter / search starts a new request epoch and
//   cancels the previous one; a response from an old epoch is discarded

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::domain::{Character, StatusFilter};
use crate::error::{AppError, AppResult};
use crate::events::telemetry;
use crate::integrations::CharacterCatalog;
use crate::services::character_cache_service::CharacterCache;
use crate::services::connectivity::ConnectivityMonitor;

pub const LOAD_ERROR: &str = "Failed to load characters";
pub const FILTER_ERROR: &str = "No characters match that filter";
pub const SEARCH_ERROR: &str = "No characters found with that name";
pub const SEARCH_OFFLINE_ERROR: &str = "A connection is required to search";

/// What the listing screen renders
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CharacterListState {
    pub characters: Vec<Character>,
    /// Last page fetched from the network (0 before the first fetch)
    pub current_page: u32,
    /// Whether pagination is active
    pub has_more: bool,
    pub status_filter: StatusFilter,
    pub search_query: Option<String>,
    pub error: Option<String>,
    /// Characters came from the offline snapshot
    pub from_cache: bool,
}

struct RequestEpoch {
    id: u64,
    token: CancellationToken,
}

/// Clears the in-flight flag however `load_more` exits
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct CharacterBrowser {
    catalog: Arc<dyn CharacterCatalog>,
    cache: Arc<CharacterCache>,
    connectivity: Arc<ConnectivityMonitor>,
    state: Mutex<CharacterListState>,
    epoch: Mutex<RequestEpoch>,
    loading_more: AtomicBool,
}

impl CharacterBrowser {
    pub fn new(
        catalog: Arc<dyn CharacterCatalog>,
        cache: Arc<CharacterCache>,
        connectivity: Arc<ConnectivityMonitor>,
    ) -> Self {
        Self {
            catalog,
            cache,
            connectivity,
            state: Mutex::new(CharacterListState::default()),
            epoch: Mutex::new(RequestEpoch {
                id: 0,
                token: CancellationToken::new(),
            }),
            loading_more: AtomicBool::new(false),
        }
    }

    pub fn snapshot(&self) -> CharacterListState {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Abandon whatever request is in flight
    pub fn cancel_pending(&self) {
        self.begin_epoch();
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// First unfiltered page from the network (cached on success), or the
    /// cached snapshot when offline or when the fetch fails.
    pub async fn load_initial(&self) -> AppResult<CharacterListState> {
        let (epoch, token) = self.begin_epoch();

        if !self.connectivity.is_connected() {
            let cached = self.cache.get_cached_characters().await;
            return self.apply(epoch, |state| {
                *state = CharacterListState {
                    characters: cached,
                    has_more: false,
                    from_cache: true,
                    ..CharacterListState::default()
                };
            });
        }

        match run(&token, self.catalog.list_characters(1, StatusFilter::All)).await {
            Ok(page) => {
                let has_more = page.has_next();
                let snapshot = self.apply(epoch, |state| {
                    *state = CharacterListState {
                        characters: page.results,
                        current_page: 1,
                        has_more,
                        ..CharacterListState::default()
                    };
                })?;
                self.cache.cache_characters(&snapshot.characters).await;
                Ok(snapshot)
            }
            Err(AppError::Cancelled) => Err(AppError::Cancelled),
            Err(e) => {
                telemetry::log_error(LOAD_ERROR, Some(&e.to_string()));
                let cached = self.cache.get_cached_characters().await;
                self.apply(epoch, |state| {
                    *state = CharacterListState {
                        from_cache: !cached.is_empty(),
                        characters: cached,
                        error: Some(LOAD_ERROR.to_string()),
                        ..CharacterListState::default()
                    };
                })
            }
        }
    }

    /// Append the next page. No-op when offline, when there is nothing more,
    /// or while another page load is running. Failures are logged only.
    pub async fn load_more(&self) -> AppResult<CharacterListState> {
        if !self.connectivity.is_connected() || self.loading_more.swap(true, Ordering::SeqCst) {
            return Ok(self.snapshot());
        }
        let _in_flight = InFlight(&self.loading_more);

        let (epoch, token) = self.current_epoch();
        let current = self.snapshot();
        if !current.has_more {
            return Ok(current);
        }

        let next_page = current.current_page + 1;
        match run(&token, self.catalog.list_characters(next_page, current.status_filter)).await {
            Ok(page) => {
                let has_more = page.has_next();
                let fetched = keep_matching(current.status_filter, page.results);
                let snapshot = self.apply(epoch, |state| {
                    state.characters.extend(fetched);
                    state.current_page = next_page;
                    state.has_more = has_more;
                })?;
                self.cache.cache_characters(&snapshot.characters).await;
                Ok(snapshot)
            }
            Err(AppError::Cancelled) => Err(AppError::Cancelled),
            Err(e) => {
                telemetry::log_error("Error loading more characters", Some(&e.to_string()));
                Ok(self.snapshot())
            }
        }
    }

    /// Restart the listing from page 1 with `filter`. `All` reloads the
    /// unfiltered list through [`load_initial`](Self::load_initial).
    pub async fn apply_status_filter(&self, filter: StatusFilter) -> AppResult<CharacterListState> {
        if filter == StatusFilter::All {
            return self.load_initial().await;
        }

        let (epoch, token) = self.begin_epoch();

        match run(&token, self.catalog.list_characters(1, filter)).await {
            Ok(page) => {
                let has_more = page.has_next();
                let characters = keep_matching(filter, page.results);
                let snapshot = self.apply(epoch, |state| {
                    *state = CharacterListState {
                        characters,
                        current_page: 1,
                        has_more,
                        status_filter: filter,
                        ..CharacterListState::default()
                    };
                })?;
                telemetry::log_filter_applied("status", &filter.to_string());
                Ok(snapshot)
            }
            Err(AppError::Cancelled) => Err(AppError::Cancelled),
            Err(e) => {
                telemetry::log_error("Error applying filter", Some(&e.to_string()));
                self.apply(epoch, |state| {
                    *state = CharacterListState {
                        status_filter: filter,
                        error: Some(FILTER_ERROR.to_string()),
                        ..CharacterListState::default()
                    };
                })
            }
        }
    }

    /// Name search. Blank queries reload the initial list; results never
    /// paginate and are not cached.
    pub async fn search(&self, query: &str) -> AppResult<CharacterListState> {
        let query = query.trim();
        if query.is_empty() {
            return self.load_initial().await;
        }

        let (epoch, token) = self.begin_epoch();

        if !self.connectivity.is_connected() {
            return self.apply(epoch, |state| {
                state.error = Some(SEARCH_OFFLINE_ERROR.to_string());
            });
        }

        match run(&token, self.catalog.search_characters_by_name(query)).await {
            Ok(page) => self.apply(epoch, |state| {
                *state = CharacterListState {
                    characters: page.results,
                    current_page: 1,
                    has_more: false,
                    search_query: Some(query.to_string()),
                    ..CharacterListState::default()
                };
            }),
            Err(AppError::Cancelled) => Err(AppError::Cancelled),
            Err(e) => {
                telemetry::log_error("Search error", Some(&e.to_string()));
                self.apply(epoch, |state| {
                    *state = CharacterListState {
                        search_query: Some(query.to_string()),
                        error: Some(SEARCH_ERROR.to_string()),
                        ..CharacterListState::default()
                    };
                })
            }
        }
    }

    // ========================================================================
    // INTERNAL: request epochs
    // ========================================================================

    /// Cancel the running epoch and open a new one
    fn begin_epoch(&self) -> (u64, CancellationToken) {
        let mut epoch = self.epoch.lock().unwrap_or_else(PoisonError::into_inner);
        epoch.token.cancel();
        epoch.id += 1;
        epoch.token = CancellationToken::new();
        (epoch.id, epoch.token.clone())
    }

    fn current_epoch(&self) -> (u64, CancellationToken) {
        let epoch = self.epoch.lock().unwrap_or_else(PoisonError::into_inner);
        (epoch.id, epoch.token.clone())
    }

    /// Mutate list state only if `epoch` is still the live one.
    /// The epoch lock is held across the mutation so a new epoch cannot slip in.
    fn apply<F>(&self, epoch: u64, update: F) -> AppResult<CharacterListState>
    where
        F: FnOnce(&mut CharacterListState),
    {
        let live = self.epoch.lock().unwrap_or_else(PoisonError::into_inner);
        if live.id != epoch || live.token.is_cancelled() {
            log::debug!("Discarding response from stale request epoch {}", epoch);
            return Err(AppError::Cancelled);
        }

        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        update(&mut state);
        Ok(state.clone())
    }
}

/// Drop records the catalog returned outside the requested filter
fn keep_matching(filter: StatusFilter, mut characters: Vec<Character>) -> Vec<Character> {
    let fetched = characters.len();
    characters.retain(|c| filter.matches(c.status));
    if characters.len() != fetched {
        log::warn!(
            "Catalog returned {} character(s) outside status filter {}",
            fetched - characters.len(),
            filter
        );
    }
    characters
}

/// Race a request against its epoch's cancellation
async fn run<T, F>(token: &CancellationToken, request: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(AppError::Cancelled),
        result = request => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CharacterId, CharacterPage, CharacterStatus, Episode};
    use crate::events::EventBus;
    use crate::integrations::MockCharacterCatalog;
    use crate::services::storage_service::AppStorage;
    use crate::test_support::{sample_character, sample_page, sqlite_store};
    use async_trait::async_trait;

    struct Fixture {
        _dir: tempfile::TempDir,
        cache: Arc<CharacterCache>,
        connectivity: Arc<ConnectivityMonitor>,
    }

    fn fixture() -> Fixture {
        let (dir, store) = sqlite_store();
        let bus = Arc::new(EventBus::new());
        let storage = Arc::new(AppStorage::new(Arc::new(store)));
        Fixture {
            _dir: dir,
            cache: Arc::new(CharacterCache::new(storage, Arc::clone(&bus))),
            connectivity: Arc::new(ConnectivityMonitor::new(bus)),
        }
    }

    fn browser(fx: &Fixture, catalog: impl CharacterCatalog + 'static) -> CharacterBrowser {
        CharacterBrowser::new(
            Arc::new(catalog),
            Arc::clone(&fx.cache),
            Arc::clone(&fx.connectivity),
        )
    }

    fn characters(ids: std::ops::RangeInclusive<u32>, status: CharacterStatus) -> Vec<Character> {
        ids.map(|id| sample_character(id, status)).collect()
    }

    fn network_down() -> AppError {
        AppError::HttpStatus {
            status: 503,
            url: "https://rickandmortyapi.com/api/character?page=1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_initial_load_online_caches_first_page() {
        let fx = fixture();
        let mut catalog = MockCharacterCatalog::new();
        catalog
            .expect_list_characters()
            .withf(|page, status| *page == 1 && *status == StatusFilter::All)
            .times(1)
            .returning(|_, _| {
                Ok(sample_page(
                    characters(1..=20, CharacterStatus::Alive),
                    Some("https://rickandmortyapi.com/api/character?page=2"),
                ))
            });
        let browser = browser(&fx, catalog);

        let state = browser.load_initial().await.unwrap();

        assert_eq!(state.characters.len(), 20);
        assert!(state.has_more);
        assert!(!state.from_cache);
        assert_eq!(state.error, None);
        assert_eq!(fx.cache.get_cached_characters().await.len(), 20);
    }

    #[tokio::test]
    async fn test_offline_shows_exact_cached_snapshot_without_pagination() {
        let fx = fixture();
        let cached = characters(1..=7, CharacterStatus::Alive);
        fx.cache.cache_characters(&cached).await;
        fx.connectivity.set_connected(false);

        // No expectations: any network call fails the test
        let browser = browser(&fx, MockCharacterCatalog::new());

        let state = browser.load_initial().await.unwrap();
        assert_eq!(state.characters, cached);
        assert!(!state.has_more);
        assert!(state.from_cache);

        let after_scroll = browser.load_more().await.unwrap();
        assert_eq!(after_scroll.characters.len(), 7);
    }

    #[tokio::test]
    async fn test_failed_initial_load_falls_back_to_cache() {
        let fx = fixture();
        fx.cache
            .cache_characters(&characters(1..=3, CharacterStatus::Dead))
            .await;
        let mut catalog = MockCharacterCatalog::new();
        catalog
            .expect_list_characters()
            .returning(|_, _| Err(network_down()));
        let browser = browser(&fx, catalog);

        let state = browser.load_initial().await.unwrap();

        assert_eq!(state.error.as_deref(), Some(LOAD_ERROR));
        assert_eq!(state.characters.len(), 3);
        assert!(state.from_cache);
        assert!(!state.has_more);
    }

    #[tokio::test]
    async fn test_failed_initial_load_with_empty_cache() {
        let fx = fixture();
        let mut catalog = MockCharacterCatalog::new();
        catalog
            .expect_list_characters()
            .returning(|_, _| Err(network_down()));
        let browser = browser(&fx, catalog);

        let state = browser.load_initial().await.unwrap();

        assert_eq!(state.error.as_deref(), Some(LOAD_ERROR));
        assert!(state.characters.is_empty());
        assert!(!state.from_cache);
    }

    #[tokio::test]
    async fn test_failed_reload_after_filter_resets_listing() {
        let fx = fixture();
        let mut catalog = MockCharacterCatalog::new();
        catalog
            .expect_list_characters()
            .withf(|_, status| *status == StatusFilter::Dead)
            .times(1)
            .returning(|_, _| {
                Ok(sample_page(
                    vec![sample_character(2, CharacterStatus::Dead)],
                    Some("https://rickandmortyapi.com/api/character?page=2&status=dead"),
                ))
            });
        catalog
            .expect_list_characters()
            .withf(|_, status| *status == StatusFilter::All)
            .returning(|_, _| Err(network_down()));
        let browser = browser(&fx, catalog);

        browser.apply_status_filter(StatusFilter::Dead).await.unwrap();
        let state = browser.apply_status_filter(StatusFilter::All).await.unwrap();

        assert_eq!(state.status_filter, StatusFilter::All);
        assert_eq!(state.search_query, None);
        assert_eq!(state.current_page, 0);
        assert!(state.characters.is_empty());
        assert!(!state.has_more);
        assert_eq!(state.error.as_deref(), Some(LOAD_ERROR));
    }

    #[tokio::test]
    async fn test_failed_reload_after_search_resets_query() {
        let fx = fixture();
        fx.cache
            .cache_characters(&characters(1..=2, CharacterStatus::Alive))
            .await;
        let mut catalog = MockCharacterCatalog::new();
        catalog
            .expect_search_characters_by_name()
            .returning(|_| Ok(sample_page(characters(5..=5, CharacterStatus::Alive), None)));
        catalog
            .expect_list_characters()
            .returning(|_, _| Err(network_down()));
        let browser = browser(&fx, catalog);

        browser.search("Summer").await.unwrap();
        let state = browser.search("").await.unwrap();

        assert_eq!(state.search_query, None);
        assert_eq!(state.characters.len(), 2);
        assert!(state.from_cache);
    }

    #[tokio::test]
    async fn test_load_more_appends_and_recaches() {
        let fx = fixture();
        let mut catalog = MockCharacterCatalog::new();
        catalog
            .expect_list_characters()
            .withf(|page, _| *page == 1)
            .returning(|_, _| {
                Ok(sample_page(
                    characters(1..=2, CharacterStatus::Alive),
                    Some("https://rickandmortyapi.com/api/character?page=2"),
                ))
            });
        catalog
            .expect_list_characters()
            .withf(|page, _| *page == 2)
            .times(1)
            .returning(|_, _| Ok(sample_page(characters(3..=4, CharacterStatus::Alive), None)));
        let browser = browser(&fx, catalog);

        browser.load_initial().await.unwrap();
        let state = browser.load_more().await.unwrap();

        let ids: Vec<CharacterId> = state.characters.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(state.current_page, 2);
        assert!(!state.has_more);
        assert_eq!(fx.cache.get_cached_characters().await.len(), 4);

        // Last page reached: no further request (times(1) above)
        let state = browser.load_more().await.unwrap();
        assert_eq!(state.characters.len(), 4);
    }

    #[tokio::test]
    async fn test_load_more_failure_keeps_list() {
        let fx = fixture();
        let mut catalog = MockCharacterCatalog::new();
        catalog
            .expect_list_characters()
            .withf(|page, _| *page == 1)
            .returning(|_, _| {
                Ok(sample_page(
                    characters(1..=2, CharacterStatus::Alive),
                    Some("https://rickandmortyapi.com/api/character?page=2"),
                ))
            });
        catalog
            .expect_list_characters()
            .withf(|page, _| *page == 2)
            .returning(|_, _| Err(network_down()));
        let browser = browser(&fx, catalog);

        browser.load_initial().await.unwrap();
        let state = browser.load_more().await.unwrap();

        assert_eq!(state.characters.len(), 2);
        assert_eq!(state.current_page, 1);
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn test_status_filter_dead() {
        let fx = fixture();
        let mut catalog = MockCharacterCatalog::new();
        catalog
            .expect_list_characters()
            .withf(|page, status| *page == 1 && *status == StatusFilter::Dead)
            .times(1)
            .returning(|_, _| Ok(sample_page(characters(1..=5, CharacterStatus::Dead), None)));
        let browser = browser(&fx, catalog);

        let state = browser.apply_status_filter(StatusFilter::Dead).await.unwrap();

        assert_eq!(state.status_filter, StatusFilter::Dead);
        assert_eq!(state.characters.len(), 5);
        assert!(state.characters.iter().all(|c| c.status == CharacterStatus::Dead));
        // Filtered pages never replace the offline snapshot
        assert!(fx.cache.get_cached_characters().await.is_empty());
    }

    #[tokio::test]
    async fn test_status_filter_drops_mismatched_records() {
        let fx = fixture();
        let mut catalog = MockCharacterCatalog::new();
        catalog.expect_list_characters().returning(|_, _| {
            Ok(sample_page(
                vec![
                    sample_character(1, CharacterStatus::Alive),
                    sample_character(2, CharacterStatus::Dead),
                    sample_character(3, CharacterStatus::Unknown),
                ],
                None,
            ))
        });
        let browser = browser(&fx, catalog);

        let state = browser.apply_status_filter(StatusFilter::Dead).await.unwrap();

        let ids: Vec<CharacterId> = state.characters.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[tokio::test]
    async fn test_status_filter_failure_clears_list() {
        let fx = fixture();
        let mut catalog = MockCharacterCatalog::new();
        catalog
            .expect_list_characters()
            .returning(|_, _| Err(network_down()));
        let browser = browser(&fx, catalog);

        let state = browser.apply_status_filter(StatusFilter::Alive).await.unwrap();

        assert_eq!(state.error.as_deref(), Some(FILTER_ERROR));
        assert!(state.characters.is_empty());
        assert!(!state.has_more);
    }

    #[tokio::test]
    async fn test_search_disables_pagination() {
        let fx = fixture();
        let mut catalog = MockCharacterCatalog::new();
        catalog
            .expect_search_characters_by_name()
            .withf(|query| query == "Morty")
            .times(1)
            .returning(|_| {
                Ok(sample_page(
                    characters(2..=3, CharacterStatus::Alive),
                    Some("https://rickandmortyapi.com/api/character?page=2&name=Morty"),
                ))
            });
        let browser = browser(&fx, catalog);

        let state = browser.search("  Morty ").await.unwrap();

        assert_eq!(state.characters.len(), 2);
        assert!(!state.has_more);
        assert_eq!(state.search_query.as_deref(), Some("Morty"));
    }

    #[tokio::test]
    async fn test_search_offline_reports_error() {
        let fx = fixture();
        fx.connectivity.set_connected(false);
        let browser = browser(&fx, MockCharacterCatalog::new());

        let state = browser.search("Rick").await.unwrap();
        assert_eq!(state.error.as_deref(), Some(SEARCH_OFFLINE_ERROR));
    }

    #[tokio::test]
    async fn test_search_not_found() {
        let fx = fixture();
        let mut catalog = MockCharacterCatalog::new();
        catalog.expect_search_characters_by_name().returning(|_| {
            Err(AppError::HttpStatus {
                status: 404,
                url: "https://rickandmortyapi.com/api/character?name=zzz".to_string(),
            })
        });
        let browser = browser(&fx, catalog);

        let state = browser.search("zzz").await.unwrap();
        assert_eq!(state.error.as_deref(), Some(SEARCH_ERROR));
        assert!(state.characters.is_empty());
    }

    #[tokio::test]
    async fn test_blank_search_reloads_initial_list() {
        let fx = fixture();
        let mut catalog = MockCharacterCatalog::new();
        catalog
            .expect_list_characters()
            .withf(|page, status| *page == 1 && *status == StatusFilter::All)
            .times(1)
            .returning(|_, _| Ok(sample_page(characters(1..=1, CharacterStatus::Alive), None)));
        let browser = browser(&fx, catalog);

        let state = browser.search("   ").await.unwrap();
        assert_eq!(state.characters.len(), 1);
        assert_eq!(state.search_query, None);
    }

    /// Alive-filter requests never complete; everything else answers at once
    struct GatedCatalog;

    #[async_trait]
    impl CharacterCatalog for GatedCatalog {
        async fn list_characters(
            &self,
            _page: u32,
            status: StatusFilter,
        ) -> AppResult<CharacterPage> {
            if status == StatusFilter::Alive {
                std::future::pending::<()>().await;
            }
            Ok(sample_page(characters(1..=2, CharacterStatus::Dead), None))
        }

        async fn get_character_by_id(&self, _id: CharacterId) -> AppResult<Character> {
            Err(AppError::NotFound)
        }

        async fn get_episode_by_url(&self, _url: &str) -> AppResult<Episode> {
            Err(AppError::NotFound)
        }

        async fn get_multiple_episodes(&self, _urls: &[String]) -> AppResult<Vec<Episode>> {
            Err(AppError::NotFound)
        }

        async fn search_characters_by_name(&self, _query: &str) -> AppResult<CharacterPage> {
            Err(AppError::NotFound)
        }
    }

    #[tokio::test]
    async fn test_new_filter_cancels_stale_request() {
        let fx = fixture();
        let browser = browser(&fx, GatedCatalog);

        let (stale, fresh) = tokio::join!(
            browser.apply_status_filter(StatusFilter::Alive),
            async {
                tokio::task::yield_now().await;
                browser.apply_status_filter(StatusFilter::Dead).await
            }
        );

        assert!(matches!(stale, Err(AppError::Cancelled)));
        let fresh = fresh.unwrap();
        assert_eq!(fresh.status_filter, StatusFilter::Dead);
        assert_eq!(browser.snapshot().status_filter, StatusFilter::Dead);
    }

    #[tokio::test]
    async fn test_cancel_pending_discards_response() {
        let fx = fixture();
        let browser = browser(&fx, GatedCatalog);

        let (result, _) = tokio::join!(
            browser.apply_status_filter(StatusFilter::Alive),
            async {
                tokio::task::yield_now().await;
                browser.cancel_pending();
            }
        );

        assert!(matches!(result, Err(AppError::Cancelled)));
        assert_eq!(browser.snapshot(), CharacterListState::default());
    }
}
