// src/services/favorites_service.rs
//
// Favorites state container
//
// RULES:
// - Single source of truth for which characters are favorited
// - Sole writer of the persisted favorite set
// - Every change goes through domain::favorites::reduce
// - Persistence is fire-and-forget; in-memory state is always the presented truth
//
// KNOWN HAZARDS (kept on purpose, see DESIGN.md):
// - hydrate() replaces state wholesale, so a mutation made before it
//   completes is lost
// - reset_favorites_state() does not touch storage; without a storage wipe
//   the old set comes back on the next hydrate

use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::{mpsc, oneshot};

use crate::domain::{reduce, validate_favorite_set, CharacterId, FavoriteSet, FavoritesCommand};
use crate::events::telemetry;
use crate::events::{EventBus, FavoritesChanged};
use crate::services::storage_service::AppStorage;

enum PersistRequest {
    Save(Vec<CharacterId>),
    Flush(oneshot::Sender<()>),
}

pub struct FavoritesStore {
    state: RwLock<FavoriteSet>,
    storage: Arc<AppStorage>,
    event_bus: Arc<EventBus>,
    persist_tx: mpsc::UnboundedSender<PersistRequest>,
}

impl FavoritesStore {
    /// Create an empty store and spawn its persistence worker.
    ///
    /// Must be called from within a tokio runtime. Call [`hydrate`](Self::hydrate)
    /// to load the persisted set.
    pub fn new(storage: Arc<AppStorage>, event_bus: Arc<EventBus>) -> Self {
        let (persist_tx, persist_rx) = mpsc::unbounded_channel();
        tokio::spawn(run_persistence_worker(Arc::clone(&storage), persist_rx));

        Self {
            state: RwLock::new(FavoriteSet::new()),
            storage,
            event_bus,
            persist_tx,
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn favorite_ids(&self) -> Vec<CharacterId> {
        self.read_state().ids().to_vec()
    }

    pub fn favorites_count(&self) -> usize {
        self.read_state().len()
    }

    pub fn is_favorite(&self, id: CharacterId) -> bool {
        self.read_state().contains(id)
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    pub fn add_favorite(&self, id: CharacterId) {
        if let Some(snapshot) = self.dispatch(FavoritesCommand::Add(id)) {
            self.queue_save(snapshot);
        }
        telemetry::log_favorite_toggle(id, true);
    }

    pub fn remove_favorite(&self, id: CharacterId) {
        if let Some(snapshot) = self.dispatch(FavoritesCommand::Remove(id)) {
            self.queue_save(snapshot);
        }
        telemetry::log_favorite_toggle(id, false);
    }

    /// Returns the membership after the toggle
    pub fn toggle_favorite(&self, id: CharacterId) -> bool {
        if self.is_favorite(id) {
            self.remove_favorite(id);
            false
        } else {
            self.add_favorite(id);
            true
        }
    }

    /// Empty the in-memory set. Storage is left untouched; callers wiping
    /// all data must also clear storage (see DataResetService).
    pub fn reset_favorites_state(&self) {
        self.dispatch(FavoritesCommand::Reset);
    }

    /// Load the persisted set and replace in-memory state with it.
    /// Returns the number of favorites loaded.
    pub async fn hydrate(&self) -> usize {
        let saved = self.storage.get_favorites().await;
        self.dispatch(FavoritesCommand::Set(saved));
        self.favorites_count()
    }

    /// Wait until every queued write has reached storage
    pub async fn flush(&self) {
        let (tx, rx) = oneshot::channel();
        if self.persist_tx.send(PersistRequest::Flush(tx)).is_err() {
            return;
        }
        let _ = rx.await;
    }

    /// Be notified after every change of the set
    pub fn subscribe<F>(&self, handler: F)
    where
        F: Fn(&FavoritesChanged) + Send + Sync + 'static,
    {
        self.event_bus.subscribe::<FavoritesChanged, _>(handler);
    }

    // ========================================================================
    // INTERNAL
    // ========================================================================

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, FavoriteSet> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply a command; returns the new set when it actually changed.
    /// Subscribers run after the lock is released.
    fn dispatch(&self, command: FavoritesCommand) -> Option<Vec<CharacterId>> {
        let snapshot = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            let next = reduce(&state, &command);
            if next == *state {
                return None;
            }
            debug_assert!(validate_favorite_set(&next).is_ok());
            *state = next;
            state.ids().to_vec()
        };

        log::debug!("{} -> {:?}", command.name(), snapshot);
        self.event_bus
            .emit(FavoritesChanged::new(snapshot.clone(), command.name()));

        Some(snapshot)
    }

    fn queue_save(&self, snapshot: Vec<CharacterId>) {
        if self.persist_tx.send(PersistRequest::Save(snapshot)).is_err() {
            log::warn!("Favorites persistence worker is gone; change kept in memory only");
        }
    }
}

/// Writes arrive in mutation order, so the last write always carries the
/// latest set. Exits when the store is dropped.
async fn run_persistence_worker(
    storage: Arc<AppStorage>,
    mut rx: mpsc::UnboundedReceiver<PersistRequest>,
) {
    while let Some(request) = rx.recv().await {
        match request {
            PersistRequest::Save(ids) => storage.save_favorites(&ids).await,
            PersistRequest::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
}
