//! Write-behind persistence.
//!
//! A single task owns all storage writes. Requests arrive in dispatch
//! order; consecutive saves of the same pattern queued while a write is in
//! flight collapse to the newest one. A save of a different pattern ends
//! the run, so every pattern's last edit reaches its own slot.

use std::sync::Arc;

use bubblestitch_core::{AppEvent, EventBus, Pattern, StorageEvent};
use bubblestitch_storage::PatternStore;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

pub(crate) enum PersistRequest {
    Save(Arc<Pattern>),
    /// Acknowledged once every earlier request has been handled.
    Flush(oneshot::Sender<()>),
}

pub(crate) type PersistSender = mpsc::UnboundedSender<PersistRequest>;

pub(crate) fn spawn(store: Arc<dyn PatternStore>, events: Arc<EventBus>) -> (PersistSender, JoinHandle<()>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(run(store, events, rx));
    (tx, handle)
}

async fn run(
    store: Arc<dyn PatternStore>,
    events: Arc<EventBus>,
    mut rx: mpsc::UnboundedReceiver<PersistRequest>,
) {
    tracing::debug!("Persistence writer started");
    while let Some(first) = rx.recv().await {
        let mut pending = Vec::new();
        let mut waiters = Vec::new();

        let mut next = Some(first);
        while let Some(request) = next {
            match request {
                PersistRequest::Save(pattern) => coalesce(&mut pending, pattern),
                PersistRequest::Flush(ack) => waiters.push(ack),
            }
            next = rx.try_recv().ok();
        }

        for pattern in &pending {
            save(store.as_ref(), &events, pattern).await;
        }
        for ack in waiters {
            let _ = ack.send(());
        }
    }
    tracing::debug!("Persistence writer stopped");
}

/// Queues `pattern`, replacing the previous entry when it is a newer
/// version of the same pattern.
fn coalesce(pending: &mut Vec<Arc<Pattern>>, pattern: Arc<Pattern>) {
    match pending.last_mut() {
        Some(last) if last.id == pattern.id => *last = pattern,
        _ => pending.push(pattern),
    }
}

async fn save(store: &dyn PatternStore, events: &EventBus, pattern: &Pattern) {
    let event = match store.save_current(pattern).await {
        Ok(()) => {
            tracing::debug!("Persisted pattern {}", pattern.id);
            StorageEvent::Saved {
                pattern_id: pattern.id.clone(),
            }
        }
        Err(e) => {
            tracing::warn!("Failed to save pattern {}: {}", pattern.id, e);
            StorageEvent::SaveFailed {
                pattern_id: pattern.id.clone(),
                reason: e.to_string(),
            }
        }
    };
    events.publish(AppEvent::Storage(event));
}
