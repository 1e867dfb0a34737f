//! Frozen schemas
//!
//! A [`Schema`] is the published result of a load. It owns its types and
//! answers containment and attribute questions without mutation, so it can
//! be shared between threads behind an `Arc` with no locking.

use std::collections::HashMap;
use std::fmt;

use super::elements::{TypeRef, TypeSpec};

/// Identity of a loaded schema, unique within the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaId(u32);

impl SchemaId {
    pub(crate) fn new(id: u32) -> Self {
        Self(id)
    }

    /// Numeric value of the id
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "schema-{}", self.0)
    }
}

/// A loaded, immutable schema
#[derive(Debug)]
pub struct Schema {
    id: SchemaId,
    location: Option<String>,
    target_namespace: Option<String>,
    types: Vec<TypeSpec>,
    by_name: HashMap<String, usize>,
}

impl Schema {
    pub(crate) fn new(
        id: SchemaId,
        location: Option<String>,
        target_namespace: Option<String>,
        types: Vec<TypeSpec>,
    ) -> Self {
        let by_name = types
            .iter()
            .enumerate()
            .map(|(index, ty)| (ty.name().to_string(), index))
            .collect();
        Self {
            id,
            location,
            target_namespace,
            types,
            by_name,
        }
    }

    /// Identity of the schema
    pub fn id(&self) -> SchemaId {
        self.id
    }

    /// Where the schema was loaded from
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Target namespace
    pub fn target_namespace(&self) -> Option<&str> {
        self.target_namespace.as_deref()
    }

    /// Number of types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if the schema declares no types
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// All types in declaration order
    pub fn types(&self) -> impl ExactSizeIterator<Item = &TypeSpec> + '_ {
        self.types.iter()
    }

    /// Container types in declaration order
    pub fn containers(&self) -> impl Iterator<Item = &TypeSpec> + '_ {
        self.types.iter().filter(|ty| ty.is_container())
    }

    /// Number of declared containment edges
    pub fn edge_count(&self) -> usize {
        self.types.iter().map(|ty| ty.containable_types().count()).sum()
    }

    /// Look up a type by name
    pub fn get(&self, name: &str) -> Option<&TypeSpec> {
        self.by_name.get(name).map(|&index| &self.types[index])
    }

    /// Look up a type by ref; `None` for refs into other schemas
    pub fn get_ref(&self, type_ref: TypeRef) -> Option<&TypeSpec> {
        if type_ref.schema() != self.id {
            return None;
        }
        self.types.get(type_ref.index())
    }

    /// The declared containable types of `ty`, in declaration order
    pub fn containable_types<'a>(&'a self, ty: &'a TypeSpec) -> impl Iterator<Item = &'a TypeSpec> + 'a {
        ty.containable_types()
            .filter_map(move |child| self.get_ref(child))
    }

    /// Containment check by type names; false if either name is unknown
    pub fn can_contain(&self, parent: &str, child: &str) -> bool {
        match (self.get(parent), self.get(child)) {
            (Some(parent), Some(child)) => parent.can_contain_type(child),
            _ => false,
        }
    }

    /// Types that may directly contain `ty`
    pub fn containers_of<'a>(&'a self, ty: &'a TypeSpec) -> impl Iterator<Item = &'a TypeSpec> + 'a {
        self.containers().filter(move |parent| parent.can_contain_type(ty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::builders::SchemaBuilder;

    fn sample() -> Schema {
        let mut builder = SchemaBuilder::new().with_location("collection.json");
        builder.declare_container("Collection").unwrap();
        builder.declare_container("Header").unwrap();
        builder.declare_type("Title").unwrap();
        builder.add_containment("Collection", "Header").unwrap();
        builder.add_containment("Collection", "Title").unwrap();
        builder.add_containment("Header", "Title").unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn test_lookup() {
        let schema = sample();
        assert_eq!(schema.len(), 3);
        assert_eq!(schema.location(), Some("collection.json"));
        assert!(schema.get("Header").unwrap().is_container());
        assert!(!schema.get("Title").unwrap().is_container());
        assert!(schema.get("Missing").is_none());
    }

    #[test]
    fn test_types_keep_declaration_order() {
        let schema = sample();
        let names: Vec<&str> = schema.types().map(TypeSpec::name).collect();
        assert_eq!(names, vec!["Collection", "Header", "Title"]);
    }

    #[test]
    fn test_can_contain_by_name() {
        let schema = sample();
        assert!(schema.can_contain("Collection", "Header"));
        assert!(schema.can_contain("Header", "Title"));
        assert!(!schema.can_contain("Header", "Collection"));
        assert!(!schema.can_contain("Title", "Title"));
        assert!(!schema.can_contain("Collection", "Missing"));
    }

    #[test]
    fn test_containable_types_and_containers_of() {
        let schema = sample();
        let collection = schema.get("Collection").unwrap();
        let children: Vec<&str> = schema
            .containable_types(collection)
            .map(TypeSpec::name)
            .collect();
        assert_eq!(children, vec!["Header", "Title"]);

        let title = schema.get("Title").unwrap();
        let parents: Vec<&str> = schema.containers_of(title).map(TypeSpec::name).collect();
        assert_eq!(parents, vec!["Collection", "Header"]);

        assert_eq!(schema.edge_count(), 3);
    }

    #[test]
    fn test_get_ref_rejects_other_schemas() {
        let a = sample();
        let b = sample();
        let title_b = b.get("Title").unwrap().id();
        assert_ne!(a.id(), b.id());
        assert!(a.get_ref(title_b).is_none());
        assert_eq!(b.get_ref(title_b).unwrap().name(), "Title");
    }
}
