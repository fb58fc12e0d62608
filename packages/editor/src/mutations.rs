//! # Document Mutations
//!
//! High-level semantic operations on a site document.
//!
//! ## Design Principles
//!
//! 1. **Intent-preserving**: each mutation is one user action (add, drag,
//!    edit, duplicate, delete)
//! 2. **Validated**: every mutation is checked against the document before it
//!    touches anything; a rejected mutation leaves the document unchanged
//! 3. **Invertible**: each mutation can produce its inverse for undo
//!
//! ## Mutation Semantics
//!
//! ### UpdateContent / UpdateStyle
//! - Atomic wholesale replacement of the blob, never a field-level merge
//!
//! ### MoveSection
//! - `from` indexes the sequence before removal, `to` is the insertion point
//!   after removal (drag-and-drop splice semantics)
//!
//! ### InsertSection
//! - Restores a concrete section verbatim, id included; exists for undo of
//!   `RemoveSection`. Rejected if the id is already present.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::{Section, SectionId, SiteDocument};
use crate::reorder::IndexOutOfRange;
use crate::templates::{SectionContent, SectionKind, SectionStyle, TemplateRegistry, UnknownTemplate};

/// Semantic mutations on a site document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Append a new section built from a template's defaults
    AddSection { kind: SectionKind },

    /// Re-insert a concrete section at an index (undo of RemoveSection)
    InsertSection { index: usize, section: Section },

    /// Replace a section's content wholesale
    UpdateContent {
        section_id: SectionId,
        content: SectionContent,
    },

    /// Replace a section's style wholesale
    UpdateStyle {
        section_id: SectionId,
        style: SectionStyle,
    },

    /// Remove a section from the document
    RemoveSection { section_id: SectionId },

    /// Copy a section and insert the copy right after the original
    DuplicateSection { section_id: SectionId },

    /// Drag a section from one position to another
    MoveSection { from: usize, to: usize },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error(transparent)]
    UnknownTemplate(#[from] UnknownTemplate),

    #[error("section not found: {0}")]
    SectionNotFound(SectionId),

    #[error(transparent)]
    IndexOutOfRange(#[from] IndexOutOfRange),

    #[error("section id already present: {0}")]
    DuplicateId(SectionId),
}

impl Mutation {
    /// Check the mutation against the document without applying it
    pub fn validate(
        &self,
        doc: &SiteDocument,
        registry: &TemplateRegistry,
    ) -> Result<(), MutationError> {
        match self {
            Mutation::AddSection { kind } => {
                registry.get(*kind)?;
                Ok(())
            }

            Mutation::InsertSection { index, section } => {
                if *index > doc.len() {
                    return Err(IndexOutOfRange {
                        index: *index,
                        len: doc.len(),
                    }
                    .into());
                }
                if doc.section(&section.id).is_some() {
                    return Err(MutationError::DuplicateId(section.id.clone()));
                }
                Ok(())
            }

            Mutation::UpdateContent { section_id, .. }
            | Mutation::UpdateStyle { section_id, .. }
            | Mutation::RemoveSection { section_id }
            | Mutation::DuplicateSection { section_id } => {
                doc.section(section_id)
                    .ok_or_else(|| MutationError::SectionNotFound(section_id.clone()))?;
                Ok(())
            }

            Mutation::MoveSection { from, to } => {
                let len = doc.len();
                for index in [*from, *to] {
                    if index >= len {
                        return Err(IndexOutOfRange { index, len }.into());
                    }
                }
                Ok(())
            }
        }
    }

    /// Compute the mutation that undoes this one
    ///
    /// Must be called against the document state this mutation will be
    /// applied to: inverses of `AddSection`/`DuplicateSection` name the id
    /// the generator will mint next.
    pub fn invert(&self, doc: &SiteDocument) -> Result<Mutation, MutationError> {
        match self {
            Mutation::AddSection { .. } | Mutation::DuplicateSection { .. } => {
                Ok(Mutation::RemoveSection {
                    section_id: doc.peek_next_id(),
                })
            }

            Mutation::InsertSection { section, .. } => Ok(Mutation::RemoveSection {
                section_id: section.id.clone(),
            }),

            Mutation::UpdateContent { section_id, .. } => {
                let section = doc
                    .section(section_id)
                    .ok_or_else(|| MutationError::SectionNotFound(section_id.clone()))?;
                Ok(Mutation::UpdateContent {
                    section_id: section_id.clone(),
                    content: section.content.clone(),
                })
            }

            Mutation::UpdateStyle { section_id, .. } => {
                let section = doc
                    .section(section_id)
                    .ok_or_else(|| MutationError::SectionNotFound(section_id.clone()))?;
                Ok(Mutation::UpdateStyle {
                    section_id: section_id.clone(),
                    style: section.style.clone(),
                })
            }

            Mutation::RemoveSection { section_id } => {
                let index = doc
                    .index_of(section_id)
                    .ok_or_else(|| MutationError::SectionNotFound(section_id.clone()))?;
                let section = doc.sections()[index].clone();
                Ok(Mutation::InsertSection { index, section })
            }

            Mutation::MoveSection { from, to } => Ok(Mutation::MoveSection {
                from: *to,
                to: *from,
            }),
        }
    }
}

/// Result of a successfully applied mutation
#[derive(Debug, Clone, PartialEq)]
pub struct MutationOutcome {
    /// Document version after the mutation
    pub version: u64,

    /// Id minted by AddSection/DuplicateSection, if any
    pub new_section_id: Option<SectionId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutation_serialization() {
        let mutation = Mutation::UpdateContent {
            section_id: SectionId::new("a1b2-3"),
            content: SectionContent::from_value(serde_json::json!({ "title": "Hello" })),
        };

        let json = serde_json::to_string(&mutation).unwrap();
        let deserialized: Mutation = serde_json::from_str(&json).unwrap();

        assert_eq!(mutation, deserialized);
    }

    #[test]
    fn test_validation_rejects_missing_section() {
        let doc = SiteDocument::new("site-1", "Test site");
        let registry = TemplateRegistry::builtin();

        let mutation = Mutation::RemoveSection {
            section_id: SectionId::new("nope"),
        };

        assert_eq!(
            mutation.validate(&doc, &registry),
            Err(MutationError::SectionNotFound(SectionId::new("nope")))
        );
    }

    #[test]
    fn test_validation_rejects_unregistered_template() {
        let doc = SiteDocument::new("site-1", "Test site");
        let registry = TemplateRegistry::empty();

        let mutation = Mutation::AddSection {
            kind: SectionKind::Hero,
        };

        assert!(matches!(
            mutation.validate(&doc, &registry),
            Err(MutationError::UnknownTemplate(_))
        ));
    }

    #[test]
    fn test_move_inverse_swaps_indices() {
        let registry = TemplateRegistry::builtin();
        let mut doc = SiteDocument::new("site-1", "Test site");
        doc.add_section(&registry, SectionKind::Hero).unwrap();
        doc.add_section(&registry, SectionKind::About).unwrap();

        let mutation = Mutation::MoveSection { from: 0, to: 1 };
        let inverse = mutation.invert(&doc).unwrap();

        assert_eq!(inverse, Mutation::MoveSection { from: 1, to: 0 });
    }
}
