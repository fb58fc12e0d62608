//! # Sitebloc Workspace
//!
//! Async coordination layer for the Sitebloc editor: the persistence
//! gateway, the debounced autosave scheduler, and the editing session that
//! ties them to a document.
//!
//! ## Architecture
//!
//! ```text
//! user action ─▶ EditSession ─▶ SiteDocument (sitebloc-editor)
//!                    │
//!                    ▼ notify_change (latest snapshot)
//!               Autosave actor ──debounce──▶ SiteStore::save
//!                    │                            │
//!                    └── watch: Idle/Pending/Saving/Failed ──▶ UI
//! ```
//!
//! Saves are single-flight: the actor awaits each persistence call before
//! issuing the next, so a stale in-flight response can never overwrite newer
//! data.

mod autosave;
mod session;
mod store;

pub use autosave::{
    Autosave, AutosaveConfig, AutosaveState, AutosaveStatus, DEFAULT_DEBOUNCE,
};
pub use session::EditSession;
pub use store::{FileStore, MemoryStore, SiteStore, StoreError, StoredSite};
