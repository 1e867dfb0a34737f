//! Registry of loaded schemas
//!
//! The registry owns every published [`Schema`] and resolves [`TypeRef`]s
//! across them. Schemas are handed out as `Arc<Schema>` so callers can keep
//! using a schema after the registry has been cleared.

use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;

use super::builders::SchemaBuilder;
use super::elements::{TypeRef, TypeSpec};
use super::schemas::{Schema, SchemaId};
use crate::declarations::SchemaDeclaration;
use crate::error::Result;
use crate::limits::Limits;

/// Loaded schemas, in load order
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: IndexMap<SchemaId, Arc<Schema>>,
    limits: Limits,
}

impl SchemaRegistry {
    /// Create an empty registry with default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the limits applied to schemas loaded from declarations
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Publish a built schema
    pub fn register(&mut self, schema: Schema) -> Arc<Schema> {
        let schema = Arc::new(schema);
        tracing::debug!(
            schema = %schema.id(),
            location = schema.location().unwrap_or("<anonymous>"),
            "schema registered"
        );
        self.schemas.insert(schema.id(), Arc::clone(&schema));
        schema
    }

    /// Build and publish a schema from a declaration
    pub fn load(&mut self, decl: &SchemaDeclaration) -> Result<Arc<Schema>> {
        let mut builder = SchemaBuilder::new().with_limits(self.limits);
        builder.add_declaration(decl)?;
        let schema = builder.build()?;
        Ok(self.register(schema))
    }

    /// Build and publish a schema from a JSON declaration file
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<Arc<Schema>> {
        let decl = SchemaDeclaration::from_path(path)?;
        self.load(&decl)
    }

    /// Look up a schema by id
    pub fn get(&self, id: SchemaId) -> Option<&Arc<Schema>> {
        self.schemas.get(&id)
    }

    /// Most recently loaded schema with this location
    pub fn by_location(&self, location: &str) -> Option<&Arc<Schema>> {
        self.schemas
            .values()
            .rev()
            .find(|schema| schema.location() == Some(location))
    }

    /// All schemas in load order
    pub fn schemas(&self) -> impl ExactSizeIterator<Item = &Arc<Schema>> + '_ {
        self.schemas.values()
    }

    /// Number of loaded schemas
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Check if no schema is loaded
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Resolve a type ref in whichever schema owns it
    pub fn resolve(&self, type_ref: TypeRef) -> Option<&TypeSpec> {
        self.get(type_ref.schema())?.get_ref(type_ref)
    }

    /// Containment check on refs; false if either ref is unknown
    pub fn can_contain(&self, parent: TypeRef, child: TypeRef) -> bool {
        match (self.resolve(parent), self.resolve(child)) {
            (Some(parent), Some(child)) => parent.can_contain_type(child),
            _ => false,
        }
    }

    /// Drop all schemas
    pub fn clear(&mut self) {
        self.schemas.clear();
    }
}
