//! # Section Template Registry
//!
//! Maps a section kind to its default content and style. The registry is
//! populated once at startup and is read-only afterwards; looking up an
//! unregistered kind is the caller's error, not a panic.
//!
//! Content and style are opaque to the core: they are carried as JSON object
//! maps, copied and replaced wholesale by mutations. Per-template field
//! schemas are enforced at the form boundary, outside this crate.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use thiserror::Error;

/// Enumerable tag identifying a section template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Hero,
    About,
    Services,
    Contact,
    Features,
    Testimonials,
    Pricing,
    Gallery,
    Text,
}

impl SectionKind {
    /// All kinds the built-in registry knows about
    pub const ALL: [SectionKind; 9] = [
        SectionKind::Hero,
        SectionKind::About,
        SectionKind::Services,
        SectionKind::Contact,
        SectionKind::Features,
        SectionKind::Testimonials,
        SectionKind::Pricing,
        SectionKind::Gallery,
        SectionKind::Text,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Hero => "hero",
            SectionKind::About => "about",
            SectionKind::Services => "services",
            SectionKind::Contact => "contact",
            SectionKind::Features => "features",
            SectionKind::Testimonials => "testimonials",
            SectionKind::Pricing => "pricing",
            SectionKind::Gallery => "gallery",
            SectionKind::Text => "text",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionKind {
    type Err = UnknownTemplate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownTemplate(s.to_string()))
    }
}

/// Lookup of a template that is not registered
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown section template: {0}")]
pub struct UnknownTemplate(pub String);

/// Opaque per-section content blob (field name → value)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionContent(pub Map<String, Value>);

/// Opaque per-section presentation blob
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionStyle(pub Map<String, Value>);

impl SectionContent {
    /// Build from a JSON value; non-object values become an empty map
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }
}

impl SectionStyle {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }
}

/// Default content and style for one section kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionDefaults {
    pub content: SectionContent,
    pub style: SectionStyle,
}

/// Registry of section templates, keyed by kind
///
/// Registration happens at construction; `get` never mutates.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    entries: HashMap<SectionKind, SectionDefaults>,
}

impl TemplateRegistry {
    /// Registry with no templates (embedding hosts register their own)
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Registry preloaded with every built-in template
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for kind in SectionKind::ALL {
            registry.register(kind, builtin_defaults(kind));
        }
        registry
    }

    pub fn register(&mut self, kind: SectionKind, defaults: SectionDefaults) {
        self.entries.insert(kind, defaults);
    }

    /// Look up defaults for a kind
    pub fn get(&self, kind: SectionKind) -> Result<&SectionDefaults, UnknownTemplate> {
        self.entries
            .get(&kind)
            .ok_or_else(|| UnknownTemplate(kind.to_string()))
    }

    pub fn contains(&self, kind: SectionKind) -> bool {
        self.entries.contains_key(&kind)
    }

    /// Registered kinds, in no particular order
    pub fn kinds(&self) -> impl Iterator<Item = SectionKind> + '_ {
        self.entries.keys().copied()
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_defaults(kind: SectionKind) -> SectionDefaults {
    let (content, style) = match kind {
        SectionKind::Hero => (
            json!({
                "title": "Main headline",
                "subtitle": "A catchy subtitle",
                "cta": "Learn more",
                "background_image": "",
            }),
            json!({ "background": "indigo-800", "text_color": "white", "align": "center" }),
        ),
        SectionKind::About => (
            json!({
                "title": "About us",
                "description": "A short introduction to your company.",
            }),
            json!({ "background": "white", "text_color": "gray-900" }),
        ),
        SectionKind::Services => (
            json!({
                "title": "Our services",
                "subtitle": "Solutions tailored to your needs",
                "services": [
                    { "title": "Consulting", "description": "Professional expertise", "icon": "briefcase" },
                    { "title": "Strategy", "description": "Custom action plans", "icon": "target" },
                    { "title": "Innovation", "description": "Creative solutions", "icon": "bulb" },
                ],
            }),
            json!({ "background": "gray-50", "text_color": "gray-900" }),
        ),
        SectionKind::Contact => (
            json!({
                "title": "Contact",
                "subtitle": "Tell us about your project",
                "email": "",
                "phone": "",
                "show_form": true,
            }),
            json!({ "background": "white", "text_color": "gray-900" }),
        ),
        SectionKind::Features => (
            json!({
                "title": "Our features",
                "features": [
                    { "title": "Feature 1", "description": "Description of feature 1", "icon": "bulb" },
                    { "title": "Feature 2", "description": "Description of feature 2", "icon": "shield" },
                    { "title": "Feature 3", "description": "Description of feature 3", "icon": "chart" },
                ],
            }),
            json!({ "background": "white", "text_color": "gray-900" }),
        ),
        SectionKind::Testimonials => (
            json!({
                "title": "What our clients say",
                "testimonials": [
                    { "quote": "An excellent service!", "author": "Jane Smith", "role": "CEO, Acme", "avatar": "" },
                    { "quote": "Exactly what we needed.", "author": "John Doe", "role": "Designer, Studio", "avatar": "" },
                ],
            }),
            json!({ "background": "gray-50", "text_color": "gray-900" }),
        ),
        SectionKind::Pricing => (
            json!({
                "title": "Pricing",
                "description": "Pick the plan that fits",
                "plans": [
                    { "name": "Basic", "price": "9.99", "period": "month", "features": ["1 site", "Community support"] },
                    { "name": "Pro", "price": "29.99", "period": "month", "features": ["10 sites", "Priority support", "Custom domain"] },
                ],
            }),
            json!({ "background": "white", "text_color": "gray-900", "highlight": "indigo-600" }),
        ),
        SectionKind::Gallery => (
            json!({ "title": "Gallery", "images": [] }),
            json!({ "background": "white", "columns": 3 }),
        ),
        SectionKind::Text => (
            json!({ "body": "Write something here." }),
            json!({ "background": "white", "text_color": "gray-900" }),
        ),
    };

    SectionDefaults {
        content: SectionContent::from_value(content),
        style: SectionStyle::from_value(style),
    }
}
