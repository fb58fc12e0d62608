//! # Sitebloc Editor
//!
//! Core section-document engine for the Sitebloc site builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ templates: kind → default content/style     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: SiteDocument + mutations            │
//! │  - Add/edit/duplicate/delete sections       │
//! │  - Drag-reorder (remove + insert splice)    │
//! │  - Validated, all-or-nothing operations     │
//! │  - Undo/redo via recorded inverses          │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ workspace: autosave + persistence gateway   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The document is the unit of persistence**: sections are never saved
//!    piecemeal
//! 2. **Ids are identity**: sections are addressed by stable minted ids,
//!    order is positional
//! 3. **Content is opaque**: section content/style are JSON blobs replaced
//!    wholesale; field semantics live at the form boundary
//! 4. **Mutations validate first**: a rejected operation leaves the document
//!    untouched
//!
//! ## Usage
//!
//! ```rust
//! use sitebloc_editor::{SectionKind, SiteDocument, TemplateRegistry};
//!
//! let registry = TemplateRegistry::builtin();
//! let mut doc = SiteDocument::new("site-1", "My site");
//!
//! let hero = doc.add_section(&registry, SectionKind::Hero)?;
//! doc.add_section(&registry, SectionKind::Contact)?;
//!
//! // Drag the hero below the contact section
//! doc.move_section(&registry, 0, 1)?;
//! assert_eq!(doc.sections()[1].id, hero);
//! # Ok::<(), sitebloc_editor::MutationError>(())
//! ```

mod document;
mod errors;
mod history;
mod mutations;
mod reorder;
mod templates;

pub use document::{site_seed, Section, SectionId, SectionIdGenerator, SiteDocument};
pub use errors::EditorError;
pub use history::{MutationBatch, UndoStack};
pub use mutations::{Mutation, MutationError, MutationOutcome};
pub use reorder::{move_item, IndexOutOfRange};
pub use templates::{
    SectionContent, SectionDefaults, SectionKind, SectionStyle, TemplateRegistry, UnknownTemplate,
};
