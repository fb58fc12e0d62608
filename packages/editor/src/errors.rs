//! Error types for the editor

use thiserror::Error;

use crate::mutations::MutationError;

/// Top-level error surface of the editor crate
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] MutationError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SiteDocument;
    use crate::templates::{SectionKind, TemplateRegistry};

    // Both error sources funnel into EditorError through `?`
    fn add_hero(doc: &mut SiteDocument) -> Result<(), EditorError> {
        let registry = TemplateRegistry::empty();
        doc.add_section(&registry, SectionKind::Hero)?;
        Ok(())
    }

    #[test]
    fn test_mutation_errors_convert() {
        let mut doc = SiteDocument::new("site-1", "My site");
        let err = add_hero(&mut doc).unwrap_err();
        assert!(matches!(
            err,
            EditorError::Mutation(MutationError::UnknownTemplate(_))
        ));
    }

    #[test]
    fn test_serialization_errors_convert() {
        let err = SiteDocument::from_json("{ not json").unwrap_err();
        assert!(matches!(err, EditorError::Serialize(_)));
    }
}
