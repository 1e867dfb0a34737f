//! Containment across schemas loaded from declaration files

use std::path::PathBuf;
use std::sync::Arc;

use metadoc::namespaces::{QName, XML_NAMESPACE};
use metadoc::validators::{Schema, SchemaRegistry, TypeSpec};
use metadoc::Error;
use pretty_assertions::assert_eq;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load(registry: &mut SchemaRegistry, name: &str) -> Arc<Schema> {
    registry.load_file(fixture(name)).unwrap()
}

#[test]
fn test_declared_containment() {
    let mut registry = SchemaRegistry::new();
    let schema = load(&mut registry, "collection.json");

    assert!(schema.can_contain("Collection", "Header"));
    assert!(schema.can_contain("Collection", "Title"));
    assert!(schema.can_contain("Collection", "Creator"));
    assert!(schema.can_contain("Collection", "Collection"));
    assert!(schema.can_contain("Header", "Title"));

    assert!(!schema.can_contain("Header", "Creator"));
    assert!(!schema.can_contain("Title", "Title"));
    assert!(!schema.can_contain("Creator", "Collection"));
}

#[test]
fn test_containable_types_in_declaration_order() {
    let mut registry = SchemaRegistry::new();
    let schema = load(&mut registry, "collection.json");

    let collection = schema.get("Collection").unwrap();
    let children: Vec<&str> = schema
        .containable_types(collection)
        .map(TypeSpec::name)
        .collect();
    assert_eq!(children, vec!["Header", "Title", "Creator", "Collection"]);
}

#[test]
fn test_identically_named_types_are_distinct() {
    let mut registry = SchemaRegistry::new();
    let collection_schema = load(&mut registry, "collection.json");
    let catalogue_schema = load(&mut registry, "catalogue.json");

    let header = collection_schema.get("Header").unwrap();
    let catalogue = catalogue_schema.get("Catalogue").unwrap();
    let title_a = collection_schema.get("Title").unwrap();
    let title_b = catalogue_schema.get("Title").unwrap();

    assert_eq!(title_a.name(), title_b.name());
    assert_ne!(title_a.id(), title_b.id());

    assert!(header.can_contain_type(title_a));
    assert!(!header.can_contain_type(title_b));
    assert!(catalogue.can_contain_type(title_b));
    assert!(!catalogue.can_contain_type(title_a));

    assert!(registry.can_contain(header.id(), title_a.id()));
    assert!(!registry.can_contain(header.id(), title_b.id()));
    assert_eq!(registry.resolve(title_b.id()).unwrap().name(), "Title");
}

#[test]
fn test_attribute_checks_on_loaded_types() {
    let mut registry = SchemaRegistry::new();
    let schema = load(&mut registry, "collection.json");

    let collection = schema.get("Collection").unwrap().as_element();
    assert!(collection.is_valid_attribute(&QName::local("ComponentId")));
    assert!(!collection.is_valid_attribute(&QName::local("lang")));

    let err = collection
        .check_attributes([(QName::local("ref"), "t1")])
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let title = schema.get("Title").unwrap().as_element();
    let lang = QName::new(XML_NAMESPACE, "lang");
    assert_eq!(title.attribute(&lang).unwrap().value_type(), "xs:language");

    let completed = title
        .check_attributes(Vec::<(QName, String)>::new())
        .unwrap();
    assert_eq!(completed[&lang], "en");
}

#[test]
fn test_undeclared_child_fails_to_load() {
    let mut registry = SchemaRegistry::new();
    let err = registry
        .load_file(fixture("undeclared_child.json"))
        .unwrap_err();
    match err {
        Error::Schema(e) => assert_eq!(e.type_name.as_deref(), Some("Collection")),
        other => panic!("unexpected error: {}", other),
    }
    assert!(registry.is_empty());
}

#[test]
fn test_schemas_are_shareable_across_threads() {
    let mut registry = SchemaRegistry::new();
    let schema = load(&mut registry, "collection.json");

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let schema = Arc::clone(&schema);
            std::thread::spawn(move || schema.can_contain("Collection", "Title"))
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
