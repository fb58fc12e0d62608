//! # Autosave Scheduler
//!
//! Coalesces a burst of document mutations into one persistence call after a
//! quiet period. Debounce, not throttle: every change restarts the timer, so
//! a steady stream of edits delays the save until input pauses.
//!
//! ## State machine
//!
//! ```text
//! Idle ──notify──▶ Pending ──timer──▶ Saving ──ok───▶ Idle
//!                    ▲  ▲                │
//!                    │  └───notify───────┤ (queued, saved after resolve)
//!                    └─────notify──── Failed ◀──err───┘
//! ```
//!
//! The scheduler is an actor task owning the timer and the latest snapshot.
//! Saves are awaited inline by the actor, which makes the single-flight
//! invariant structural: while a save is outstanding, notifications queue on
//! the command channel and only update the snapshot once the save resolves.
//! Dropping the handle stops the actor; a pending timer never fires against
//! a torn-down session.

use std::future::pending;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::Instant;
use tokio_stream::wrappers::WatchStream;

use sitebloc_editor::SiteDocument;

use crate::store::{SiteStore, StoreError};

/// Quiet period the original editor uses between the last edit and the save
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone)]
pub struct AutosaveConfig {
    /// Quiet period after the last change before saving
    pub debounce: Duration,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

/// Where the scheduler currently is in its save cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutosaveStatus {
    /// Nothing to save
    Idle,
    /// A save is scheduled; the quiet-period timer is running
    Pending,
    /// The persistence call is in flight
    Saving,
    /// The last save failed; the error is retained until the next change
    Failed,
}

/// Session-local autosave state, published for the UI
#[derive(Debug, Clone)]
pub struct AutosaveState {
    pub status: AutosaveStatus,
    pub last_error: Option<Arc<StoreError>>,
}

impl AutosaveState {
    fn idle() -> Self {
        Self {
            status: AutosaveStatus::Idle,
            last_error: None,
        }
    }
}

enum Command {
    Notify(SiteDocument),
    Flush(oneshot::Sender<()>),
}

/// Handle to a spawned autosave actor
pub struct Autosave {
    tx: mpsc::UnboundedSender<Command>,
    state_rx: watch::Receiver<AutosaveState>,
}

impl Autosave {
    /// Spawn the scheduler against a store
    pub fn spawn(store: Arc<dyn SiteStore>, config: AutosaveConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(AutosaveState::idle());
        tokio::spawn(run(store, config, rx, state_tx));
        Self { tx, state_rx }
    }

    /// Record the latest document snapshot and (re)start the quiet-period
    /// timer
    pub fn notify_change(&self, document: &SiteDocument) {
        let _ = self.tx.send(Command::Notify(document.clone()));
    }

    /// Cancel any pending timer and persist the dirty snapshot now, waiting
    /// for completion; no-op when there is nothing to save
    pub async fn flush(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(Command::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.await;
        }
    }

    /// Current state snapshot
    pub fn state(&self) -> AutosaveState {
        self.state_rx.borrow().clone()
    }

    /// True while a save is scheduled or in flight ("Saving…" vs "All
    /// changes saved")
    pub fn is_pending(&self) -> bool {
        matches!(
            self.state().status,
            AutosaveStatus::Pending | AutosaveStatus::Saving
        )
    }

    /// Stream of state changes, for UI subscriptions
    pub fn state_stream(&self) -> WatchStream<AutosaveState> {
        WatchStream::new(self.state_rx.clone())
    }
}

async fn run(
    store: Arc<dyn SiteStore>,
    config: AutosaveConfig,
    mut rx: mpsc::UnboundedReceiver<Command>,
    state_tx: watch::Sender<AutosaveState>,
) {
    let mut dirty: Option<SiteDocument> = None;
    let mut deadline: Option<Instant> = None;

    loop {
        // Capture the deadline by value so the select arms can reset it
        let timer = async move {
            match deadline {
                Some(at) => tokio::time::sleep_until(at).await,
                None => pending().await,
            }
        };

        tokio::select! {
            command = rx.recv() => match command {
                Some(Command::Notify(document)) => {
                    dirty = Some(document);
                    deadline = Some(Instant::now() + config.debounce);
                    // Re-entering Pending clears any stale failure
                    let _ = state_tx.send(AutosaveState {
                        status: AutosaveStatus::Pending,
                        last_error: None,
                    });
                }

                Some(Command::Flush(ack)) => {
                    deadline = None;
                    if let Some(document) = dirty.take() {
                        save(store.as_ref(), document, &state_tx).await;
                    }
                    let _ = ack.send(());
                }

                // Handle dropped: discard the timer and any unsaved snapshot
                None => break,
            },

            _ = timer => {
                deadline = None;
                if let Some(document) = dirty.take() {
                    save(store.as_ref(), document, &state_tx).await;
                }
            }
        }
    }
}

async fn save(
    store: &dyn SiteStore,
    document: SiteDocument,
    state_tx: &watch::Sender<AutosaveState>,
) {
    let _ = state_tx.send(AutosaveState {
        status: AutosaveStatus::Saving,
        last_error: None,
    });
    tracing::debug!(site_id = %document.site_id, version = document.version, "autosave started");

    match store.save(&document).await {
        Ok(()) => {
            tracing::info!(site_id = %document.site_id, version = document.version, "autosave complete");
            let _ = state_tx.send(AutosaveState::idle());
        }
        Err(e) => {
            tracing::warn!(site_id = %document.site_id, error = %e, "autosave failed");
            let _ = state_tx.send(AutosaveState {
                status: AutosaveStatus::Failed,
                last_error: Some(Arc::new(e)),
            });
        }
    }
}
