//! The state host.
//!
//! Owns the live [`ApplicationState`] for a session. Actions are reduced
//! one at a time under a write lock, observers are notified after the lock
//! is released, and changed patterns are handed to the persistence writer.

use std::sync::Arc;

use bubblestitch_core::{
    AppEvent, EventBus, EventFilter, Pattern, StateEvent, StorageEvent, SubscriptionId,
};
use bubblestitch_state::{reduce, Action, ApplicationState};
use bubblestitch_storage::{PatternStore, StorageResult};
use parking_lot::RwLock;
use tokio::sync::{broadcast, oneshot};
use tokio::task::JoinHandle;

use crate::writer::{self, PersistRequest, PersistSender};

/// Single owner of the session state.
pub struct StateHost {
    state: RwLock<ApplicationState>,
    events: Arc<EventBus>,
    store: Arc<dyn PatternStore>,
    persist_tx: PersistSender,
    writer: JoinHandle<()>,
}

impl StateHost {
    /// Open a session on `store` with a private event bus.
    pub async fn open(store: Arc<dyn PatternStore>) -> Self {
        Self::open_with_events(store, Arc::new(EventBus::new())).await
    }

    /// Open a session publishing to `events`.
    ///
    /// Subscribers registered on `events` beforehand see the restore and
    /// any load failure. The persisted current pattern replaces the default
    /// one before the first save can be queued.
    pub async fn open_with_events(store: Arc<dyn PatternStore>, events: Arc<EventBus>) -> Self {
        let mut state = ApplicationState::new();

        match store.load_current().await {
            Ok(Some(pattern)) => match pattern.validate() {
                Ok(()) => {
                    let pattern_id = pattern.id.clone();
                    tracing::info!("Restoring pattern {} ({})", pattern_id, pattern.name);
                    state = reduce(&state, Action::restore(pattern));
                    events.publish(AppEvent::State(StateEvent::Restored { pattern_id }));
                }
                Err(e) => load_failed(
                    &events,
                    format!("stored pattern {} is invalid: {}", pattern.id, e),
                ),
            },
            Ok(None) => tracing::info!("No saved pattern, starting fresh"),
            Err(e) => load_failed(&events, e.to_string()),
        }

        let (persist_tx, writer) = writer::spawn(Arc::clone(&store), Arc::clone(&events));

        Self {
            state: RwLock::new(state),
            events,
            store,
            persist_tx,
            writer,
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ApplicationState {
        self.state.read().clone()
    }

    /// Reduce `action` into the live state and return the new state.
    pub fn apply(&self, action: Action) -> ApplicationState {
        let name = action.name();
        let (next, pattern_changed) = {
            let mut state = self.state.write();
            let next = reduce(&state, action);
            let pattern_changed = !next.shares_pattern(&state);
            if pattern_changed {
                // Queued under the lock so saves keep dispatch order.
                self.queue(PersistRequest::Save(next.pattern_arc()));
            }
            *state = next.clone();
            (next, pattern_changed)
        };

        tracing::debug!(
            "Applied {} (pattern changed: {}, undo {}, redo {})",
            name,
            pattern_changed,
            next.undo_depth(),
            next.redo_depth()
        );
        self.events.publish(AppEvent::State(StateEvent::Changed {
            action: name.to_string(),
            pattern_changed,
            undo_depth: next.undo_depth(),
            redo_depth: next.redo_depth(),
        }));
        next
    }

    /// Decode and apply a wire action. Returns `None` when the action could
    /// not be decoded; the state is left untouched in that case.
    pub fn apply_json(&self, json: &str) -> Option<ApplicationState> {
        match Action::from_json(json) {
            Ok(action) => Some(self.apply(action)),
            Err(e) => {
                tracing::warn!("Ignoring undecodable action: {}", e);
                self.events.publish(AppEvent::State(StateEvent::Ignored {
                    reason: e.to_string(),
                }));
                None
            }
        }
    }

    /// Register a synchronous observer.
    ///
    /// Handlers run on the dispatching thread after the state lock has been
    /// released, so they may call [`StateHost::state`].
    pub fn subscribe<F>(&self, filter: EventFilter, handler: F) -> SubscriptionId
    where
        F: Fn(AppEvent) + Send + Sync + 'static,
    {
        self.events.subscribe(filter, handler)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Receiver for async observers.
    pub fn receiver(&self) -> broadcast::Receiver<AppEvent> {
        self.events.receiver()
    }

    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    /// Wait until every save queued so far has been attempted.
    pub async fn flush(&self) {
        let (ack, done) = oneshot::channel();
        if self.persist_tx.send(PersistRequest::Flush(ack)).is_ok() {
            let _ = done.await;
        }
    }

    /// Saved patterns, most recently modified first.
    pub async fn saved_patterns(&self) -> StorageResult<Vec<Pattern>> {
        self.flush().await;
        self.store.load_all().await
    }

    /// Load a saved pattern into the session. Returns `false` when no
    /// pattern with `id` is stored; a stored pattern that fails validation
    /// is an error and leaves the session as it was.
    pub async fn open_saved(&self, id: &str) -> StorageResult<bool> {
        self.flush().await;
        match self.store.load(id).await? {
            Some(pattern) => {
                pattern.validate()?;
                tracing::info!("Opening saved pattern {} ({})", pattern.id, pattern.name);
                self.apply(Action::load_pattern(pattern));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Delete a saved pattern. The live pattern is not affected and is saved
    /// again on its next change.
    pub async fn delete_saved(&self, id: &str) -> StorageResult<bool> {
        self.flush().await;
        let deleted = self.store.delete(id).await?;
        if deleted {
            tracing::info!("Deleted saved pattern {}", id);
            self.events.publish(AppEvent::Storage(StorageEvent::Deleted {
                pattern_id: id.to_string(),
            }));
        }
        Ok(deleted)
    }

    /// Stop the session after every queued save has been attempted.
    pub async fn close(self) {
        let Self {
            persist_tx, writer, ..
        } = self;
        drop(persist_tx);
        if let Err(e) = writer.await {
            tracing::error!("Persistence writer failed: {}", e);
        }
    }

    fn queue(&self, request: PersistRequest) {
        if self.persist_tx.send(request).is_err() {
            tracing::error!("Persistence writer is gone, change not saved");
        }
    }
}

fn load_failed(events: &EventBus, reason: String) {
    tracing::warn!("Failed to load current pattern: {}", reason);
    events.publish(AppEvent::Storage(StorageEvent::LoadFailed { reason }));
}

impl std::fmt::Debug for StateHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("StateHost")
            .field("pattern_id", &state.pattern().id)
            .field("mode", &state.mode())
            .field("undo_depth", &state.undo_depth())
            .field("redo_depth", &state.redo_depth())
            .finish()
    }
}
