//! Schema builders
//!
//! Loading is the only phase in which types, attributes, and containment
//! edges can be added. A [`SchemaBuilder`] collects them by name, checks
//! them against its [`Limits`], and [`SchemaBuilder::build`] freezes the
//! result into a [`Schema`] with a fresh [`SchemaId`]. Child types may be
//! named before they are declared; every name must be declared by the time
//! the schema is built.

use std::sync::atomic::{AtomicU32, Ordering};

use indexmap::{IndexMap, IndexSet};

use super::attributes::AttributeSpec;
use super::elements::{ContainerTypeSpec, ElementTypeSpec, TypeRef, TypeSpec};
use super::schemas::{Schema, SchemaId};
use crate::declarations::{AttributeUse, ContentModel, SchemaDeclaration};
use crate::error::{Result, SchemaError};
use crate::limits::Limits;
use crate::names::validate_ncname;
use crate::namespaces::QName;

static NEXT_SCHEMA_ID: AtomicU32 = AtomicU32::new(1);

fn next_schema_id() -> SchemaId {
    SchemaId::new(NEXT_SCHEMA_ID.fetch_add(1, Ordering::Relaxed))
}

#[derive(Debug, Default)]
struct TypeDraft {
    attributes: IndexMap<QName, AttributeSpec>,
    /// `Some` for containers, holding child type names in declaration order
    children: Option<IndexSet<String>>,
}

/// Mutable schema under construction
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    location: Option<String>,
    target_namespace: Option<String>,
    limits: Limits,
    types: IndexMap<String, TypeDraft>,
}

impl SchemaBuilder {
    /// Create an empty builder with default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a schema loader from a declaration
    pub fn from_declaration(decl: &SchemaDeclaration) -> Result<Self> {
        let mut builder = Self::new();
        builder.add_declaration(decl)?;
        Ok(builder)
    }

    /// Set the schema location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the target namespace
    pub fn with_target_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.target_namespace = Some(namespace.into());
        self
    }

    /// Set the limits checked while loading
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Number of declared types
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Check if a type with this name has been declared
    pub fn contains_type(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Declare a type that contains no other types
    pub fn declare_type(&mut self, name: &str) -> Result<()> {
        self.declare(name, None)
    }

    /// Declare a container type; its children are added afterwards
    pub fn declare_container(&mut self, name: &str) -> Result<()> {
        self.declare(name, Some(IndexSet::new()))
    }

    fn declare(&mut self, name: &str, children: Option<IndexSet<String>>) -> Result<()> {
        validate_ncname(name)?;
        if self.types.contains_key(name) {
            return Err(self
                .error("Duplicate type declaration")
                .with_type_name(name)
                .into());
        }
        self.limits.check_types(self.types.len() + 1)?;
        self.types.insert(
            name.to_string(),
            TypeDraft {
                attributes: IndexMap::new(),
                children,
            },
        );
        Ok(())
    }

    /// Add an attribute slot to a declared type
    pub fn add_attribute(&mut self, type_name: &str, attribute: AttributeSpec) -> Result<()> {
        validate_ncname(attribute.name())?;
        let existing = &self.draft(type_name)?.attributes;
        if existing.contains_key(attribute.key()) {
            return Err(self
                .error(format!("Duplicate attribute '{}'", attribute.key()))
                .with_type_name(type_name)
                .into());
        }
        self.limits.check_attributes(existing.len() + 1)?;
        self.draft_mut(type_name)?
            .attributes
            .insert(attribute.key().clone(), attribute);
        Ok(())
    }

    /// Declare that instances of `child` may appear directly inside `parent`
    ///
    /// `parent` must be a declared container. `child` may be declared later;
    /// adding the same edge twice has no effect.
    pub fn add_containment(&mut self, parent: &str, child: &str) -> Result<()> {
        validate_ncname(child)?;
        let limits = self.limits;
        let children = self.children_mut(parent)?;
        if children.contains(child) {
            return Ok(());
        }
        limits.check_containable_types(children.len() + 1)?;
        children.insert(child.to_string());
        Ok(())
    }

    /// Add every element particle of a content model as a child of `parent`
    pub fn add_content_model(&mut self, parent: &str, model: &ContentModel) -> Result<()> {
        self.children_mut(parent)?;
        self.walk_content(parent, model, 1)
    }

    fn walk_content(&mut self, parent: &str, model: &ContentModel, depth: usize) -> Result<()> {
        self.limits.check_content_depth(depth)?;
        match model {
            ContentModel::Element { type_name } => self.add_containment(parent, type_name),
            _ => model
                .particles()
                .iter()
                .try_for_each(|particle| self.walk_content(parent, particle, depth + 1)),
        }
    }

    /// Add all types of a declaration
    ///
    /// The declaration's location and target namespace replace the builder's
    /// when present.
    pub fn add_declaration(&mut self, decl: &SchemaDeclaration) -> Result<()> {
        if let Some(location) = &decl.location {
            self.location = Some(location.clone());
        }
        if let Some(namespace) = &decl.target_namespace {
            self.target_namespace = Some(namespace.clone());
        }

        for ty in &decl.types {
            match ty.content {
                Some(_) => self.declare_container(&ty.name)?,
                None => self.declare_type(&ty.name)?,
            }
        }

        for ty in &decl.types {
            for attr in &ty.attributes {
                let mut spec = AttributeSpec::new(&attr.namespace, attr.name.as_str())
                    .with_value_type(attr.value_type.as_str())
                    .with_mandatory(attr.use_mode == AttributeUse::Required);
                if let Some(default) = &attr.default {
                    spec = spec.with_default_value(default.as_str());
                }
                self.add_attribute(&ty.name, spec)?;
            }
            if let Some(content) = &ty.content {
                self.add_content_model(&ty.name, content)?;
            }
        }

        Ok(())
    }

    /// Freeze the builder into a schema
    ///
    /// Fails if a containment edge names a type that was never declared.
    pub fn build(self) -> Result<Schema> {
        let id = next_schema_id();

        let mut types = Vec::with_capacity(self.types.len());
        for (index, (name, draft)) in self.types.iter().enumerate() {
            let element = ElementTypeSpec::new(
                TypeRef::new(id, index as u32),
                name.clone(),
                draft.attributes.clone(),
            );
            let spec = match &draft.children {
                None => TypeSpec::Element(element),
                Some(children) => {
                    let mut containable = IndexSet::with_capacity(children.len());
                    for child in children {
                        let child_index = self.types.get_index_of(child).ok_or_else(|| {
                            self.error(format!("Containable type '{}' is not declared", child))
                                .with_type_name(name.as_str())
                        })?;
                        containable.insert(TypeRef::new(id, child_index as u32));
                    }
                    TypeSpec::Container(ContainerTypeSpec::new(element, containable))
                }
            };
            types.push(spec);
        }

        let schema = Schema::new(id, self.location, self.target_namespace, types);
        tracing::debug!(
            schema = %schema.id(),
            location = schema.location().unwrap_or("<anonymous>"),
            types = schema.len(),
            edges = schema.edge_count(),
            "schema built"
        );
        Ok(schema)
    }

    fn error(&self, message: impl Into<String>) -> SchemaError {
        let err = SchemaError::new(message);
        match &self.location {
            Some(location) => err.with_location(location.as_str()),
            None => err,
        }
    }

    fn draft(&self, type_name: &str) -> Result<&TypeDraft> {
        match self.types.get(type_name) {
            Some(draft) => Ok(draft),
            None => Err(self.undeclared(type_name).into()),
        }
    }

    fn draft_mut(&mut self, type_name: &str) -> Result<&mut TypeDraft> {
        let undeclared = self.undeclared(type_name);
        self.types
            .get_mut(type_name)
            .ok_or_else(|| undeclared.into())
    }

    fn undeclared(&self, type_name: &str) -> SchemaError {
        self.error("Type is not declared").with_type_name(type_name)
    }

    fn children_mut(&mut self, parent: &str) -> Result<&mut IndexSet<String>> {
        let not_container = self.error("Type is not a container").with_type_name(parent);
        self.draft_mut(parent)?
            .children
            .as_mut()
            .ok_or_else(|| not_container.into())
    }
}
