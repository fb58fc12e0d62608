//! # Site Document
//!
//! The ordered sequence of sections for one site, plus the id generator that
//! mints stable section ids.
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Edit → Autosave → Save
//!   ↓      ↓        ↓        ↓
//! Store  Mutations  Debounce Store
//! ```
//!
//! Invariants:
//! - section ids are unique within the document and never reused
//! - positional order of `sections` is the display order
//! - the whole document is the unit of persistence
//! - a failed mutation leaves the document untouched

use std::fmt;

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

use crate::errors::EditorError;
use crate::mutations::{Mutation, MutationError, MutationOutcome};
use crate::reorder;
use crate::templates::{SectionContent, SectionKind, SectionStyle, TemplateRegistry};

/// Stable, unique identifier of one section
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One addressable, orderable block of page content
///
/// Order is not stored here; it is positional within the owning document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub kind: SectionKind,
    pub content: SectionContent,
    pub style: SectionStyle,
}

/// Derive a stable document seed from a site id using CRC32
pub fn site_seed(site_id: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(format!("site://{}", site_id).as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential section-id generator, seeded per site
///
/// Serialized with the document so a reloaded session keeps minting fresh
/// ids instead of reusing earlier ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionIdGenerator {
    seed: String,
    count: u32,
}

impl SectionIdGenerator {
    pub fn new(site_id: &str) -> Self {
        Self {
            seed: site_seed(site_id),
            count: 0,
        }
    }

    /// Mint the next id
    pub fn next_id(&mut self) -> SectionId {
        self.count += 1;
        SectionId::new(format!("{}-{}", self.seed, self.count))
    }

    /// The id `next_id` would mint, without consuming it
    pub fn peek(&self) -> SectionId {
        SectionId::new(format!("{}-{}", self.seed, self.count + 1))
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

/// Editable section document for one site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteDocument {
    /// Persistent identity of the site
    pub site_id: String,

    /// Display name, editable alongside the sections
    pub name: String,

    /// Ordered sections; position is display order
    sections: Vec<Section>,

    /// Increments on every applied mutation
    pub version: u64,

    id_gen: SectionIdGenerator,
}

impl SiteDocument {
    /// Create an empty document for a site
    pub fn new(site_id: impl Into<String>, name: impl Into<String>) -> Self {
        let site_id = site_id.into();
        let id_gen = SectionIdGenerator::new(&site_id);
        Self {
            site_id,
            name: name.into(),
            sections: Vec::new(),
            version: 0,
            id_gen,
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Find a section by id
    pub fn section(&self, id: &SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| &s.id == id)
    }

    /// Position of a section by id
    pub fn index_of(&self, id: &SectionId) -> Option<usize> {
        self.sections.iter().position(|s| &s.id == id)
    }

    /// The id the next AddSection/DuplicateSection will mint
    pub fn peek_next_id(&self) -> SectionId {
        self.id_gen.peek()
    }

    /// Apply a mutation, validating first
    ///
    /// All-or-nothing: on error the document (including `version`) is
    /// exactly as it was.
    pub fn apply(
        &mut self,
        mutation: Mutation,
        registry: &TemplateRegistry,
    ) -> Result<MutationOutcome, MutationError> {
        mutation.validate(self, registry)?;

        let new_section_id = match mutation {
            Mutation::AddSection { kind } => {
                let defaults = registry.get(kind)?;
                let id = self.id_gen.next_id();
                self.sections.push(Section {
                    id: id.clone(),
                    kind,
                    content: defaults.content.clone(),
                    style: defaults.style.clone(),
                });
                Some(id)
            }

            Mutation::InsertSection { index, section } => {
                self.sections.insert(index, section);
                None
            }

            Mutation::UpdateContent {
                section_id,
                content,
            } => {
                let section = self.section_mut(&section_id)?;
                section.content = content;
                None
            }

            Mutation::UpdateStyle { section_id, style } => {
                let section = self.section_mut(&section_id)?;
                section.style = style;
                None
            }

            Mutation::RemoveSection { section_id } => {
                let index = self
                    .index_of(&section_id)
                    .ok_or(MutationError::SectionNotFound(section_id))?;
                self.sections.remove(index);
                None
            }

            Mutation::DuplicateSection { section_id } => {
                let index = self
                    .index_of(&section_id)
                    .ok_or(MutationError::SectionNotFound(section_id))?;
                let id = self.id_gen.next_id();
                let original = &self.sections[index];
                let copy = Section {
                    id: id.clone(),
                    kind: original.kind,
                    content: original.content.clone(),
                    style: original.style.clone(),
                };
                self.sections.insert(index + 1, copy);
                Some(id)
            }

            Mutation::MoveSection { from, to } => {
                reorder::move_item(&mut self.sections, from, to)?;
                None
            }
        };

        self.version += 1;
        Ok(MutationOutcome {
            version: self.version,
            new_section_id,
        })
    }

    /// Append a new section built from template defaults, returning its id
    pub fn add_section(
        &mut self,
        registry: &TemplateRegistry,
        kind: SectionKind,
    ) -> Result<SectionId, MutationError> {
        let outcome = self.apply(Mutation::AddSection { kind }, registry)?;
        Ok(outcome.new_section_id.expect("AddSection mints an id"))
    }

    /// Replace a section's content wholesale
    pub fn update_content(
        &mut self,
        registry: &TemplateRegistry,
        section_id: SectionId,
        content: SectionContent,
    ) -> Result<(), MutationError> {
        self.apply(
            Mutation::UpdateContent {
                section_id,
                content,
            },
            registry,
        )?;
        Ok(())
    }

    /// Replace a section's style wholesale
    pub fn update_style(
        &mut self,
        registry: &TemplateRegistry,
        section_id: SectionId,
        style: SectionStyle,
    ) -> Result<(), MutationError> {
        self.apply(Mutation::UpdateStyle { section_id, style }, registry)?;
        Ok(())
    }

    pub fn remove_section(
        &mut self,
        registry: &TemplateRegistry,
        section_id: SectionId,
    ) -> Result<(), MutationError> {
        self.apply(Mutation::RemoveSection { section_id }, registry)?;
        Ok(())
    }

    /// Copy a section in place, returning the copy's fresh id
    pub fn duplicate_section(
        &mut self,
        registry: &TemplateRegistry,
        section_id: SectionId,
    ) -> Result<SectionId, MutationError> {
        let outcome = self.apply(Mutation::DuplicateSection { section_id }, registry)?;
        Ok(outcome.new_section_id.expect("DuplicateSection mints an id"))
    }

    /// Drag a section from one position to another
    pub fn move_section(
        &mut self,
        registry: &TemplateRegistry,
        from: usize,
        to: usize,
    ) -> Result<(), MutationError> {
        self.apply(Mutation::MoveSection { from, to }, registry)?;
        Ok(())
    }

    /// Serialize to the persisted JSON form
    pub fn to_json(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a document from its persisted JSON form
    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        Ok(serde_json::from_str(json)?)
    }

    fn section_mut(&mut self, id: &SectionId) -> Result<&mut Section, MutationError> {
        self.sections
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| MutationError::SectionNotFound(id.clone()))
    }
}
