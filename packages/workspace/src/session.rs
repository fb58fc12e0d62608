//! # Edit Session
//!
//! One open editing session over a site document: applies validated
//! mutations, tracks undo/redo and selection, and notifies the autosave
//! scheduler after every successful change. Closing the session flushes
//! unsaved work before tearing the scheduler down.
//!
//! All document access happens on the caller's task; the only suspension
//! points are the store calls (`open`, `close`).

use std::sync::Arc;

use sitebloc_editor::{
    Mutation, MutationError, MutationOutcome, SectionId, SiteDocument, TemplateRegistry, UndoStack,
};

use crate::autosave::{Autosave, AutosaveConfig, AutosaveState};
use crate::store::{SiteStore, StoreError};

/// Name given to a site that has never been saved
const UNTITLED: &str = "Untitled site";

pub struct EditSession {
    registry: TemplateRegistry,
    document: SiteDocument,
    history: UndoStack,
    selected: Option<SectionId>,
    autosave: Autosave,
}

impl EditSession {
    /// Open a session for a site, loading its document from the store or
    /// starting an empty one if the site was never saved
    pub async fn open(
        store: Arc<dyn SiteStore>,
        site_id: &str,
        registry: TemplateRegistry,
        config: AutosaveConfig,
    ) -> Result<Self, StoreError> {
        let document = match store.load(site_id).await {
            Ok(document) => document,
            Err(StoreError::SiteNotFound(_)) => {
                tracing::debug!(site_id, "no saved document, starting empty");
                SiteDocument::new(site_id, UNTITLED)
            }
            Err(e) => return Err(e),
        };

        let autosave = Autosave::spawn(store, config);

        Ok(Self {
            registry,
            document,
            history: UndoStack::new(),
            selected: None,
            autosave,
        })
    }

    pub fn document(&self) -> &SiteDocument {
        &self.document
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Apply a mutation with undo tracking; schedules an autosave on success
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationOutcome, MutationError> {
        let outcome = self
            .history
            .apply(mutation, &mut self.document, &self.registry)?;
        self.autosave.notify_change(&self.document);
        Ok(outcome)
    }

    /// Undo the last edit; returns false when there is nothing to undo
    pub fn undo(&mut self) -> Result<bool, MutationError> {
        let changed = self.history.undo(&mut self.document, &self.registry)?;
        if changed {
            self.autosave.notify_change(&self.document);
        }
        Ok(changed)
    }

    /// Redo the last undone edit
    pub fn redo(&mut self) -> Result<bool, MutationError> {
        let changed = self.history.redo(&mut self.document, &self.registry)?;
        if changed {
            self.autosave.notify_change(&self.document);
        }
        Ok(changed)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Mark a section as selected in the sidebar, or clear the selection
    pub fn select(&mut self, section_id: Option<SectionId>) {
        self.selected = section_id;
    }

    pub fn selected(&self) -> Option<&SectionId> {
        self.selected.as_ref()
    }

    pub fn autosave_state(&self) -> AutosaveState {
        self.autosave.state()
    }

    /// True while unsaved changes are scheduled or being written
    pub fn is_saving(&self) -> bool {
        self.autosave.is_pending()
    }

    /// Access the scheduler handle (state streams, manual flush)
    pub fn autosave(&self) -> &Autosave {
        &self.autosave
    }

    /// Flush unsaved changes and tear the session down
    pub async fn close(self) {
        self.autosave.flush().await;
    }
}
