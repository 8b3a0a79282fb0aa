//! Debounced, batched writer for answer edits
//!
//! Edits are collected into a generation keyed by (audit, question). Each
//! submit restarts a fixed quiet-period timer; when it fires, or when the
//! generation grows past the threshold, the whole generation is written
//! with a single upsert. A submit that arrives while a write is in flight
//! starts the next generation.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard};
use std::task::{Context, Poll};
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use super::edit::{EditKey, PendingEdit, merge_edit};
use crate::client::RecordsApi;
use crate::error::SaveError;
use crate::schema::responses;

pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);
pub const DEFAULT_THRESHOLD: usize = 40;

type SaveOutcome = Result<(), SaveError>;

/// Resolves once the generation carrying the submitted edit has been
/// written, or has failed.
#[must_use = "dropping a PendingSave discards the write outcome"]
pub struct PendingSave {
    rx: oneshot::Receiver<SaveOutcome>,
}

impl Future for PendingSave {
    type Output = SaveOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|received| received.unwrap_or(Err(SaveError::Cancelled)))
    }
}

/// Edits waiting for the next write, in first-submitted order
#[derive(Default)]
struct Generation {
    edits: Vec<PendingEdit>,
    index: HashMap<EditKey, usize>,
    waiters: Vec<oneshot::Sender<SaveOutcome>>,
}

impl Generation {
    /// Fold an edit into the generation. Returns false when a pending
    /// reset for the same key absorbed it.
    fn merge(&mut self, edit: PendingEdit) -> bool {
        let key = edit.key();
        match self.index.get(&key) {
            Some(&slot) if self.edits[slot].reset && !edit.reset => false,
            Some(&slot) => {
                let existing = self.edits[slot].clone();
                self.edits[slot] = merge_edit(Some(existing), edit);
                true
            }
            None => {
                self.index.insert(key, self.edits.len());
                self.edits.push(merge_edit(None, edit));
                true
            }
        }
    }

    fn len(&self) -> usize {
        self.edits.len()
    }

    fn notify(self, outcome: &SaveOutcome) {
        for waiter in self.waiters {
            // The submitter may have stopped listening.
            let _ = waiter.send(outcome.clone());
        }
    }
}

struct State {
    pending: Generation,
    timer: Option<JoinHandle<()>>,
    /// Identifies the live timer; a timer whose token is stale does nothing.
    timer_token: u64,
}

struct Inner<C> {
    client: Arc<C>,
    delay: Duration,
    threshold: usize,
    state: Mutex<State>,
}

impl<C: RecordsApi + 'static> Inner<C> {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn on_timer(self: Arc<Self>, token: u64) {
        let generation = {
            let mut state = self.lock();
            if state.timer_token != token {
                return;
            }
            // Detach our own handle instead of aborting it.
            state.timer = None;
            std::mem::take(&mut state.pending)
        };

        debug!("Autosave timer fired with {} edits", generation.len());
        let _ = self.write(generation).await;
    }

    async fn write(&self, generation: Generation) -> SaveOutcome {
        if generation.len() == 0 {
            generation.notify(&Ok(()));
            return Ok(());
        }

        let records: Vec<_> = generation
            .edits
            .iter()
            .map(PendingEdit::to_upsert_record)
            .collect();

        let outcome = self
            .client
            .put_records(responses::TABLE, &records)
            .await
            .map_err(SaveError::from);

        match &outcome {
            Ok(()) => info!("Saved {} responses", records.len()),
            Err(e) => warn!("{} responses not saved: {}", records.len(), e),
        }

        generation.notify(&outcome);
        outcome
    }
}

/// Write-coalescing buffer for one session.
///
/// Must be used from within a tokio runtime. Dropping the buffer cancels
/// its timer; edits still pending are reported as [`SaveError::Cancelled`].
pub struct WriteBuffer<C: RecordsApi + 'static> {
    inner: Arc<Inner<C>>,
}

impl<C: RecordsApi + 'static> WriteBuffer<C> {
    #[allow(dead_code)]
    pub fn new(client: Arc<C>) -> Self {
        Self::with_settings(client, DEFAULT_DELAY, DEFAULT_THRESHOLD)
    }

    pub fn with_settings(client: Arc<C>, delay: Duration, threshold: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                client,
                delay,
                threshold,
                state: Mutex::new(State {
                    pending: Generation::default(),
                    timer: None,
                    timer_token: 0,
                }),
            }),
        }
    }

    /// Queue an edit and restart the quiet-period timer.
    ///
    /// The returned handle can be ignored for fire-and-forget use; the
    /// write happens either way.
    pub fn submit(&self, edit: PendingEdit) -> PendingSave {
        let (tx, rx) = oneshot::channel();
        let mut state = self.inner.lock();

        if let Some(timer) = state.timer.take() {
            timer.abort();
        }

        let key = edit.key();
        if state.pending.merge(edit) {
            state.pending.waiters.push(tx);
        } else {
            debug!(
                "Edit to question {} absorbed by a pending reset",
                key.question_id
            );
            let _ = tx.send(Err(SaveError::Superseded));
        }

        if state.pending.len() > self.inner.threshold {
            let generation = std::mem::take(&mut state.pending);
            drop(state);

            debug!(
                "Autosave threshold exceeded, writing {} edits now",
                generation.len()
            );
            let inner = Arc::clone(&self.inner);
            tokio::spawn(async move {
                let _ = inner.write(generation).await;
            });
        } else {
            state.timer_token = state.timer_token.wrapping_add(1);
            let token = state.timer_token;
            let inner = Arc::clone(&self.inner);
            let delay = self.inner.delay;
            state.timer = Some(tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                inner.on_timer(token).await;
            }));
        }

        PendingSave { rx }
    }

    /// Write the pending generation now. No request is made when nothing
    /// is pending.
    pub async fn flush(&self) -> Result<(), SaveError> {
        let generation = {
            let mut state = self.inner.lock();
            if let Some(timer) = state.timer.take() {
                timer.abort();
            }
            std::mem::take(&mut state.pending)
        };

        self.inner.write(generation).await
    }

    /// Drop pending edits without writing them.
    pub fn cancel(&self) {
        let generation = {
            let mut state = self.inner.lock();
            if let Some(timer) = state.timer.take() {
                timer.abort();
            }
            std::mem::take(&mut state.pending)
        };

        if generation.len() > 0 {
            debug!("Autosave cancelled with {} edits pending", generation.len());
        }
        generation.notify(&Err(SaveError::Cancelled));
    }

    /// Number of distinct edits waiting for the next write
    #[allow(dead_code)]
    pub fn pending_len(&self) -> usize {
        self.inner.lock().pending.len()
    }
}

impl<C: RecordsApi + 'static> Drop for WriteBuffer<C> {
    fn drop(&mut self) {
        self.cancel();
    }
}
