//! # Undo/Redo Stack
//!
//! Tracks mutation history for one editing session.
//!
//! ## Design
//!
//! - Each mutation records its inverse before being applied
//! - Undo applies the inverses and moves the batch to the redo stack
//! - Redo reapplies the original mutations, recomputing inverses against the
//!   current document (AddSection mints a fresh id on redo, so the recorded
//!   inverse would name a stale one)
//! - New mutations clear the redo stack
//! - Batching groups several mutations into one undo step (a drag gesture
//!   that moves and restyles, a form submit that touches several fields)

use crate::document::SiteDocument;
use crate::mutations::{Mutation, MutationError, MutationOutcome};
use crate::templates::TemplateRegistry;

/// A group of mutations undone/redone together
#[derive(Debug, Clone)]
pub struct MutationBatch {
    /// Mutations in application order
    pub mutations: Vec<Mutation>,

    /// Inverses, in reverse order for undo
    pub inverses: Vec<Mutation>,

    /// Optional label for UI ("Reorder sections", "Edit hero")
    pub label: Option<String>,
}

impl MutationBatch {
    fn empty() -> Self {
        Self {
            mutations: Vec::new(),
            inverses: Vec::new(),
            label: None,
        }
    }

    fn single(mutation: Mutation, inverse: Mutation) -> Self {
        Self {
            mutations: vec![mutation],
            inverses: vec![inverse],
            label: None,
        }
    }
}

/// Undo/redo stack for section-document editing
#[derive(Debug)]
pub struct UndoStack {
    undo_stack: Vec<MutationBatch>,
    redo_stack: Vec<MutationBatch>,

    /// Maximum undo depth (0 = unlimited)
    max_levels: usize,

    /// Batch currently being built, if any
    current_batch: Option<MutationBatch>,
}

impl UndoStack {
    /// Stack with the default depth (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            current_batch: None,
        }
    }

    /// Apply a mutation and record it for undo
    pub fn apply(
        &mut self,
        mutation: Mutation,
        doc: &mut SiteDocument,
        registry: &TemplateRegistry,
    ) -> Result<MutationOutcome, MutationError> {
        // Inverse is computed against the pre-mutation document
        let inverse = mutation.invert(doc)?;
        let outcome = doc.apply(mutation.clone(), registry)?;

        if let Some(batch) = &mut self.current_batch {
            batch.mutations.push(mutation);
            batch.inverses.insert(0, inverse);
        } else {
            self.push_batch(MutationBatch::single(mutation, inverse));
        }

        Ok(outcome)
    }

    /// Start grouping mutations into one undo step
    pub fn begin_batch(&mut self, label: Option<String>) {
        let mut batch = MutationBatch::empty();
        batch.label = label;
        self.current_batch = Some(batch);
    }

    /// Close the current batch and push it to the undo stack
    pub fn end_batch(&mut self) {
        if let Some(batch) = self.current_batch.take() {
            if !batch.mutations.is_empty() {
                self.push_batch(batch);
            }
        }
    }

    fn push_batch(&mut self, batch: MutationBatch) {
        self.undo_stack.push(batch);

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // New work invalidates the redo future
        self.redo_stack.clear();
    }

    /// Undo the most recent batch; returns false when there is nothing to undo
    pub fn undo(
        &mut self,
        doc: &mut SiteDocument,
        registry: &TemplateRegistry,
    ) -> Result<bool, MutationError> {
        let Some(batch) = self.undo_stack.pop() else {
            return Ok(false);
        };

        for inverse in &batch.inverses {
            doc.apply(inverse.clone(), registry)?;
        }

        self.redo_stack.push(batch);
        Ok(true)
    }

    /// Redo the most recently undone batch
    pub fn redo(
        &mut self,
        doc: &mut SiteDocument,
        registry: &TemplateRegistry,
    ) -> Result<bool, MutationError> {
        let Some(mut batch) = self.redo_stack.pop() else {
            return Ok(false);
        };

        let mut inverses = Vec::with_capacity(batch.mutations.len());
        for mutation in &batch.mutations {
            inverses.insert(0, mutation.invert(doc)?);
            doc.apply(mutation.clone(), registry)?;
        }
        batch.inverses = inverses;

        self.undo_stack.push(batch);
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Label of the next undo step, if one was set
    pub fn undo_label(&self) -> Option<&str> {
        self.undo_stack.last().and_then(|b| b.label.as_deref())
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::{SectionContent, SectionKind};

    fn setup() -> (SiteDocument, TemplateRegistry, UndoStack) {
        (
            SiteDocument::new("site-1", "My site"),
            TemplateRegistry::builtin(),
            UndoStack::new(),
        )
    }

    #[test]
    fn test_fresh_stack_has_nothing_to_undo() {
        let (mut doc, registry, mut stack) = setup();
        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
        assert!(!stack.undo(&mut doc, &registry).unwrap());
        assert!(!stack.redo(&mut doc, &registry).unwrap());
    }

    #[test]
    fn test_undo_add_removes_the_section() {
        let (mut doc, registry, mut stack) = setup();

        stack
            .apply(
                Mutation::AddSection {
                    kind: SectionKind::Hero,
                },
                &mut doc,
                &registry,
            )
            .unwrap();
        assert_eq!(doc.len(), 1);

        assert!(stack.undo(&mut doc, &registry).unwrap());
        assert!(doc.is_empty());
        assert!(stack.can_redo());

        assert!(stack.redo(&mut doc, &registry).unwrap());
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.sections()[0].kind, SectionKind::Hero);
    }

    #[test]
    fn test_undo_remove_restores_section_at_index() {
        let (mut doc, registry, mut stack) = setup();
        doc.add_section(&registry, SectionKind::Hero).unwrap();
        let about = doc.add_section(&registry, SectionKind::About).unwrap();
        doc.add_section(&registry, SectionKind::Contact).unwrap();

        stack
            .apply(
                Mutation::RemoveSection {
                    section_id: about.clone(),
                },
                &mut doc,
                &registry,
            )
            .unwrap();
        assert_eq!(doc.len(), 2);

        stack.undo(&mut doc, &registry).unwrap();
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.index_of(&about), Some(1));
        assert_eq!(doc.section(&about).unwrap().kind, SectionKind::About);
    }

    #[test]
    fn test_undo_content_edit_restores_old_blob() {
        let (mut doc, registry, mut stack) = setup();
        let id = doc.add_section(&registry, SectionKind::Text).unwrap();
        let original = doc.section(&id).unwrap().content.clone();

        stack
            .apply(
                Mutation::UpdateContent {
                    section_id: id.clone(),
                    content: SectionContent::from_value(serde_json::json!({ "body": "edited" })),
                },
                &mut doc,
                &registry,
            )
            .unwrap();

        stack.undo(&mut doc, &registry).unwrap();
        assert_eq!(doc.section(&id).unwrap().content, original);
    }

    #[test]
    fn test_batched_mutations_undo_together() {
        let (mut doc, registry, mut stack) = setup();
        doc.add_section(&registry, SectionKind::Hero).unwrap();
        doc.add_section(&registry, SectionKind::About).unwrap();
        doc.add_section(&registry, SectionKind::Contact).unwrap();
        let before: Vec<SectionKind> = doc.sections().iter().map(|s| s.kind).collect();

        stack.begin_batch(Some("Reorder sections".to_string()));
        stack
            .apply(Mutation::MoveSection { from: 0, to: 2 }, &mut doc, &registry)
            .unwrap();
        stack
            .apply(Mutation::MoveSection { from: 1, to: 0 }, &mut doc, &registry)
            .unwrap();
        stack.end_batch();

        assert_eq!(stack.undo_levels(), 1);
        assert_eq!(stack.undo_label(), Some("Reorder sections"));

        stack.undo(&mut doc, &registry).unwrap();
        let after: Vec<SectionKind> = doc.sections().iter().map(|s| s.kind).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_new_mutation_clears_redo() {
        let (mut doc, registry, mut stack) = setup();

        stack
            .apply(
                Mutation::AddSection {
                    kind: SectionKind::Hero,
                },
                &mut doc,
                &registry,
            )
            .unwrap();
        stack.undo(&mut doc, &registry).unwrap();
        assert_eq!(stack.redo_levels(), 1);

        stack
            .apply(
                Mutation::AddSection {
                    kind: SectionKind::About,
                },
                &mut doc,
                &registry,
            )
            .unwrap();
        assert_eq!(stack.redo_levels(), 0);
    }

    #[test]
    fn test_max_levels_enforced() {
        let (mut doc, registry, _) = setup();
        let mut stack = UndoStack::with_max_levels(2);

        for kind in [SectionKind::Hero, SectionKind::About, SectionKind::Text] {
            stack
                .apply(Mutation::AddSection { kind }, &mut doc, &registry)
                .unwrap();
        }

        assert_eq!(stack.undo_levels(), 2);
    }

    #[test]
    fn test_redo_after_undo_of_add_stays_consistent() {
        // Redo mints a fresh id; a second undo must still remove the section
        let (mut doc, registry, mut stack) = setup();

        stack
            .apply(
                Mutation::AddSection {
                    kind: SectionKind::Hero,
                },
                &mut doc,
                &registry,
            )
            .unwrap();

        stack.undo(&mut doc, &registry).unwrap();
        stack.redo(&mut doc, &registry).unwrap();
        assert_eq!(doc.len(), 1);

        stack.undo(&mut doc, &registry).unwrap();
        assert!(doc.is_empty());
    }
}
