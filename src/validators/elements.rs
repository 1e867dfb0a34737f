//! Element types and the containment model
//!
//! Every type is owned by the [`Schema`](super::Schema) it was loaded into
//! and is addressed by a [`TypeRef`]: the originating schema plus the type's
//! slot in that schema. Containers refer to their containable child types
//! only through `TypeRef`s, never by owning them, so recursive and mutually
//! nesting types need no reference cycles.
//!
//! Containment is declared, not inferred: [`ContainerTypeSpec::can_contain_type`]
//! is a set lookup on the edges registered while the schema was loaded.

use std::collections::HashMap;
use std::fmt;

use indexmap::{IndexMap, IndexSet};

use super::attributes::AttributeSpec;
use super::schemas::SchemaId;
use crate::error::{Result, ValidationError};
use crate::namespaces::QName;

/// Handle to a type inside a loaded schema
///
/// Two refs are equal only if they name the same type of the same schema;
/// identically named types of different schemas are distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeRef {
    schema: SchemaId,
    index: u32,
}

impl TypeRef {
    pub(crate) fn new(schema: SchemaId, index: u32) -> Self {
        Self { schema, index }
    }

    /// Schema the type belongs to
    pub fn schema(&self) -> SchemaId {
        self.schema
    }

    /// Slot of the type in its schema, in declaration order
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.schema, self.index)
    }
}

/// A type: its name and declared attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementTypeSpec {
    id: TypeRef,
    name: String,
    attributes: IndexMap<QName, AttributeSpec>,
}

impl ElementTypeSpec {
    pub(crate) fn new(id: TypeRef, name: String, attributes: IndexMap<QName, AttributeSpec>) -> Self {
        Self {
            id,
            name,
            attributes,
        }
    }

    /// Identity of the type
    pub fn id(&self) -> TypeRef {
        self.id
    }

    /// Type name, unique within its schema
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared attributes in declaration order
    pub fn attributes(&self) -> impl ExactSizeIterator<Item = &AttributeSpec> + '_ {
        self.attributes.values()
    }

    /// Look up an attribute by key
    pub fn attribute(&self, key: &QName) -> Option<&AttributeSpec> {
        self.attributes.get(key)
    }

    /// Check if the type declares an attribute with this key
    pub fn is_valid_attribute(&self, key: &QName) -> bool {
        self.attributes.contains_key(key)
    }

    /// Attributes an instance must carry
    pub fn mandatory_attributes(&self) -> impl Iterator<Item = &AttributeSpec> + '_ {
        self.attributes.values().filter(|a| a.is_mandatory())
    }

    /// Check a proposed attribute set and complete it with defaults
    ///
    /// The result lists the attributes in declaration order. It fails on an
    /// attribute the type does not declare, on a key given more than once,
    /// or when a mandatory attribute is absent and has no default.
    pub fn check_attributes<I, V>(&self, values: I) -> Result<IndexMap<QName, String>>
    where
        I: IntoIterator<Item = (QName, V)>,
        V: Into<String>,
    {
        let mut supplied: HashMap<QName, String> = HashMap::new();
        for (key, value) in values {
            if !self.is_valid_attribute(&key) {
                return Err(ValidationError::new(format!("Attribute '{}' is not allowed", key))
                    .with_type_name(&self.name)
                    .with_path(format!("@{}", key))
                    .with_reason("the type does not declare this attribute")
                    .into());
            }
            if supplied.contains_key(&key) {
                return Err(ValidationError::new(format!("Attribute '{}' is repeated", key))
                    .with_type_name(&self.name)
                    .with_path(format!("@{}", key))
                    .with_reason("an attribute may be given only once")
                    .into());
            }
            supplied.insert(key, value.into());
        }

        let mut completed = IndexMap::with_capacity(self.attributes.len());
        for (key, spec) in &self.attributes {
            let value = supplied
                .remove(key)
                .or_else(|| spec.default_value().map(str::to_string));
            match value {
                Some(value) => {
                    completed.insert(key.clone(), value);
                }
                None if spec.is_mandatory() => {
                    return Err(ValidationError::new(format!("Attribute '{}' is missing", key))
                        .with_type_name(&self.name)
                        .with_path(format!("@{}", key))
                        .with_reason("attribute is mandatory and has no default")
                        .into());
                }
                None => {}
            }
        }

        Ok(completed)
    }
}

impl AsRef<ElementTypeSpec> for ElementTypeSpec {
    fn as_ref(&self) -> &ElementTypeSpec {
        self
    }
}

/// A type that may contain instances of other types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerTypeSpec {
    element: ElementTypeSpec,
    containable: IndexSet<TypeRef>,
}

impl ContainerTypeSpec {
    pub(crate) fn new(element: ElementTypeSpec, containable: IndexSet<TypeRef>) -> Self {
        Self {
            element,
            containable,
        }
    }

    /// The type's name and attributes
    pub fn as_element(&self) -> &ElementTypeSpec {
        &self.element
    }

    /// Check if an instance of `candidate` may appear directly inside this type
    pub fn can_contain_type<T>(&self, candidate: &T) -> bool
    where
        T: AsRef<ElementTypeSpec> + ?Sized,
    {
        self.containable.contains(&candidate.as_ref().id())
    }

    /// The declared containable types, in declaration order
    pub fn containable_types(&self) -> impl ExactSizeIterator<Item = TypeRef> + '_ {
        self.containable.iter().copied()
    }
}

impl AsRef<ElementTypeSpec> for ContainerTypeSpec {
    fn as_ref(&self) -> &ElementTypeSpec {
        &self.element
    }
}

/// Any type of a schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSpec {
    /// A type that contains no other types
    Element(ElementTypeSpec),
    /// A type with declared containable child types
    Container(ContainerTypeSpec),
}

impl TypeSpec {
    /// The type's name and attributes
    pub fn as_element(&self) -> &ElementTypeSpec {
        match self {
            TypeSpec::Element(element) => element,
            TypeSpec::Container(container) => container.as_element(),
        }
    }

    /// Get as container type
    pub fn as_container(&self) -> Option<&ContainerTypeSpec> {
        match self {
            TypeSpec::Element(_) => None,
            TypeSpec::Container(container) => Some(container),
        }
    }

    /// Check if this is a container type
    pub fn is_container(&self) -> bool {
        matches!(self, TypeSpec::Container(_))
    }

    /// Identity of the type
    pub fn id(&self) -> TypeRef {
        self.as_element().id()
    }

    /// Type name
    pub fn name(&self) -> &str {
        self.as_element().name()
    }

    /// Declared attributes in declaration order
    pub fn attributes(&self) -> impl ExactSizeIterator<Item = &AttributeSpec> + '_ {
        self.as_element().attributes()
    }

    /// Containment check; always false for non-container types
    pub fn can_contain_type<T>(&self, candidate: &T) -> bool
    where
        T: AsRef<ElementTypeSpec> + ?Sized,
    {
        self.as_container()
            .is_some_and(|container| container.can_contain_type(candidate))
    }

    /// Declared containable types; empty for non-container types
    pub fn containable_types(&self) -> impl Iterator<Item = TypeRef> + '_ {
        self.as_container()
            .into_iter()
            .flat_map(|container| container.containable_types())
    }
}

impl AsRef<ElementTypeSpec> for TypeSpec {
    fn as_ref(&self) -> &ElementTypeSpec {
        self.as_element()
    }
}
