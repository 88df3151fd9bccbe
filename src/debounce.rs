//! Debounced suggestion evaluation.
//!
//! Every input change for a field schedules an evaluation one debounce window
//! later. A newer change for the same field cancels the pending one, so a
//! burst of keystrokes produces a single evaluation for the last input.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::store::KeyValueStore;
use crate::suggestions::{Suggestion, SuggestionStore};

/// Suggestions computed for one input change.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionBatch {
    pub field: String,
    pub input: String,
    pub suggestions: Vec<Suggestion>,
}

struct Pending {
    seq: u64,
    token: CancellationToken,
}

type PendingMap = HashMap<String, Pending>;

/// Schedules suggestion evaluations, one outstanding evaluation per field.
///
/// Must be used from within a Tokio runtime.
pub struct SuggestionDebouncer<S> {
    store: Arc<SuggestionStore<S>>,
    delay: Duration,
    next_seq: AtomicU64,
    pending: Arc<Mutex<PendingMap>>,
}

fn lock(pending: &Mutex<PendingMap>) -> MutexGuard<'_, PendingMap> {
    pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<S: KeyValueStore + 'static> SuggestionDebouncer<S> {
    /// Uses the debounce window from the store's config.
    pub fn new(store: Arc<SuggestionStore<S>>) -> Self {
        let delay = store.config().debounce;
        Self::with_delay(store, delay)
    }

    pub fn with_delay(store: Arc<SuggestionStore<S>>, delay: Duration) -> Self {
        Self {
            store,
            delay,
            next_seq: AtomicU64::new(0),
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn store(&self) -> &Arc<SuggestionStore<S>> {
        &self.store
    }

    /// Schedules an evaluation of `input` for `field`, replacing any pending one.
    ///
    /// The resulting [`SuggestionBatch`] is sent on `tx` once the debounce
    /// window has passed without a newer change to the same field.
    pub fn schedule(
        &self,
        field: impl Into<String>,
        input: impl Into<String>,
        tx: mpsc::Sender<SuggestionBatch>,
    ) {
        let field = field.into();
        let input = input.into();
        let deadline = Instant::now() + self.delay;
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let token = CancellationToken::new();

        let previous = lock(&self.pending).insert(
            field.clone(),
            Pending {
                seq,
                token: token.clone(),
            },
        );
        if let Some(previous) = previous {
            previous.token.cancel();
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("suggestions for field {} scheduled (seq {})", field, seq);

        let store = Arc::clone(&self.store);
        let pending = Arc::clone(&self.pending);

        tokio::spawn(async move {
            // Ok means the token fired before the deadline
            if tokio::time::timeout_at(deadline, token.cancelled()).await.is_ok() {
                #[cfg(feature = "tracing")]
                tracing::debug!("suggestions for field {} cancelled (seq {})", field, seq);
                return;
            }

            {
                // a newer schedule for this field may have slipped in
                let mut guard = lock(&pending);
                let is_latest = guard.get(&field).is_some_and(|current| current.seq == seq);
                if !is_latest {
                    return;
                }
                guard.remove(&field);
            }

            let suggestions = store.get_suggestions(&field, &input);
            let batch = SuggestionBatch {
                field,
                input,
                suggestions,
            };

            if let Err(_e) = tx.send(batch).await {
                #[cfg(feature = "tracing")]
                tracing::error!("Failed to send suggestions: {}", _e);
            }
        });
    }

    /// Discards the pending evaluation of `field`, if any.
    pub fn cancel(&self, field: &str) {
        if let Some(previous) = lock(&self.pending).remove(field) {
            previous.token.cancel();
        }
    }

    /// Discards every pending evaluation.
    pub fn cancel_all(&self) {
        for (_, previous) in lock(&self.pending).drain() {
            previous.token.cancel();
        }
    }

    /// Number of fields with an evaluation still waiting for its window.
    pub fn pending_count(&self) -> usize {
        lock(&self.pending).len()
    }
}

impl<S> Drop for SuggestionDebouncer<S> {
    fn drop(&mut self) {
        for (_, previous) in lock(&self.pending).drain() {
            previous.token.cancel();
        }
    }
}
