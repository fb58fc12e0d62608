//! Longer mutation sequences: interleaved adds, drags, edits, and deletes
//! must keep the document's invariants (unique ids, coherent order,
//! monotone version).

use std::collections::HashSet;

use sitebloc_editor::{Mutation, SectionKind, SectionStyle, SiteDocument, TemplateRegistry};

fn assert_ids_unique(doc: &SiteDocument) {
    let ids: HashSet<&str> = doc.sections().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids.len(), doc.len(), "section ids must be unique");
}

#[test]
fn test_interleaved_adds_and_moves() {
    let registry = TemplateRegistry::builtin();
    let mut doc = SiteDocument::new("seq", "Sequence test");

    for kind in [
        SectionKind::Hero,
        SectionKind::Features,
        SectionKind::Pricing,
        SectionKind::Contact,
    ] {
        doc.add_section(&registry, kind).unwrap();
    }

    // Drag pricing above features, then contact to the top
    doc.move_section(&registry, 2, 1).unwrap();
    doc.move_section(&registry, 3, 0).unwrap();

    let kinds: Vec<SectionKind> = doc.sections().iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SectionKind::Contact,
            SectionKind::Hero,
            SectionKind::Pricing,
            SectionKind::Features,
        ]
    );
    assert_ids_unique(&doc);
}

#[test]
fn test_delete_in_the_middle_then_keep_editing() {
    let registry = TemplateRegistry::builtin();
    let mut doc = SiteDocument::new("seq", "Sequence test");

    let _hero = doc.add_section(&registry, SectionKind::Hero).unwrap();
    let about = doc.add_section(&registry, SectionKind::About).unwrap();
    let text = doc.add_section(&registry, SectionKind::Text).unwrap();

    doc.remove_section(&registry, about.clone()).unwrap();
    assert_eq!(doc.len(), 2);
    assert!(doc.section(&about).is_none());

    // Later sections keep their identity and stay editable
    doc.update_style(
        &registry,
        text.clone(),
        SectionStyle::from_value(serde_json::json!({ "background": "gray-900" })),
    )
    .unwrap();
    assert_eq!(
        doc.section(&text).unwrap().style.0["background"],
        serde_json::json!("gray-900")
    );

    // A removed id is never resurrected by later adds
    let fresh = doc.add_section(&registry, SectionKind::About).unwrap();
    assert_ne!(fresh, about);
    assert_ids_unique(&doc);
}

#[test]
fn test_version_counts_every_applied_mutation() {
    let registry = TemplateRegistry::builtin();
    let mut doc = SiteDocument::new("seq", "Sequence test");

    let id = doc.add_section(&registry, SectionKind::Hero).unwrap();
    doc.duplicate_section(&registry, id.clone()).unwrap();
    doc.move_section(&registry, 0, 1).unwrap();
    doc.remove_section(&registry, id).unwrap();
    assert_eq!(doc.version, 4);

    // Rejected mutations do not count
    let err = doc.apply(Mutation::MoveSection { from: 0, to: 9 }, &registry);
    assert!(err.is_err());
    assert_eq!(doc.version, 4);
}

#[test]
fn test_duplicate_chain_keeps_order_adjacent() {
    let registry = TemplateRegistry::builtin();
    let mut doc = SiteDocument::new("seq", "Sequence test");

    let a = doc.add_section(&registry, SectionKind::Gallery).unwrap();
    let b = doc.duplicate_section(&registry, a.clone()).unwrap();
    let c = doc.duplicate_section(&registry, a.clone()).unwrap();

    // Each duplicate lands right after its source
    assert_eq!(doc.index_of(&a), Some(0));
    assert_eq!(doc.index_of(&c), Some(1));
    assert_eq!(doc.index_of(&b), Some(2));
    assert_ids_unique(&doc);
}
