//! Schema declarations handed over by the schema-loading collaborator
//!
//! Compiling an XML Schema is not this crate's job. Whatever compiles it
//! describes the result in this model (usually as JSON) and
//! [`SchemaBuilder::from_declaration`](crate::validators::SchemaBuilder::from_declaration)
//! turns it into a frozen [`Schema`](crate::validators::Schema).
//!
//! ```json
//! {
//!   "location": "http://example.com/profiles/collection.xsd",
//!   "types": [
//!     {
//!       "name": "Collection",
//!       "attributes": [{ "name": "ref", "type": "xs:IDREFS" }],
//!       "content": {
//!         "kind": "sequence",
//!         "particles": [{ "kind": "element", "type": "Title" }]
//!       }
//!     },
//!     { "name": "Title" }
//!   ]
//! }
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::validators::attributes::DEFAULT_VALUE_TYPE;

/// A complete schema as handed over for loading
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SchemaDeclaration {
    /// Schema location (file path or URL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Target namespace of the schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_namespace: Option<String>,

    /// Type declarations in declaration order
    pub types: Vec<TypeDeclaration>,
}

impl SchemaDeclaration {
    /// Parse a declaration from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a declaration from a JSON reader
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Read a declaration file; the location defaults to the file path
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut decl = Self::from_reader(BufReader::new(file))?;
        if decl.location.is_none() {
            decl.location = Some(path.display().to_string());
        }
        Ok(decl)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// One type declaration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TypeDeclaration {
    /// Type name, unique within the schema
    pub name: String,

    /// Attribute declarations in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeDeclaration>,

    /// Content model; present for container types, even if empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<ContentModel>,
}

/// Attribute use mode
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AttributeUse {
    /// Attribute may be omitted
    #[default]
    Optional,
    /// Attribute must be present (or defaulted)
    Required,
}

/// One attribute declaration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttributeDeclaration {
    /// Attribute local name
    pub name: String,

    /// Namespace URI; empty for no namespace
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,

    /// Declared value type
    #[serde(rename = "type", default = "default_value_type")]
    pub value_type: String,

    /// Use mode: optional or required
    #[serde(rename = "use", default)]
    pub use_mode: AttributeUse,

    /// Default value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

fn default_value_type() -> String {
    DEFAULT_VALUE_TYPE.to_string()
}

/// Structural declaration of a container's content
///
/// Only the element particles matter for containment; the grouping
/// compositors are walked through.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ContentModel {
    /// Particles in order
    Sequence {
        /// Nested particles
        #[serde(default)]
        particles: Vec<ContentModel>,
    },
    /// One of the particles
    Choice {
        /// Nested particles
        #[serde(default)]
        particles: Vec<ContentModel>,
    },
    /// Particles in any order
    All {
        /// Nested particles
        #[serde(default)]
        particles: Vec<ContentModel>,
    },
    /// A child element of the named type
    Element {
        /// Name of the child type
        #[serde(rename = "type")]
        type_name: String,
    },
}

impl ContentModel {
    /// Element particle for a type
    pub fn element(type_name: impl Into<String>) -> Self {
        ContentModel::Element {
            type_name: type_name.into(),
        }
    }

    /// Sequence of particles
    pub fn sequence(particles: Vec<ContentModel>) -> Self {
        ContentModel::Sequence { particles }
    }

    /// Choice between particles
    pub fn choice(particles: Vec<ContentModel>) -> Self {
        ContentModel::Choice { particles }
    }

    /// Nested particles of a compositor; empty for an element particle
    pub fn particles(&self) -> &[ContentModel] {
        match self {
            ContentModel::Sequence { particles }
            | ContentModel::Choice { particles }
            | ContentModel::All { particles } => particles.as_slice(),
            ContentModel::Element { .. } => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_declaration() {
        let json = r#"{
            "location": "http://example.com/profiles/collection.xsd",
            "types": [
                {
                    "name": "Collection",
                    "attributes": [
                        { "name": "ref", "type": "xs:IDREFS" },
                        { "name": "ComponentId", "use": "required" },
                        { "name": "lang", "namespace": "http://www.w3.org/XML/1998/namespace", "default": "en" }
                    ],
                    "content": {
                        "kind": "sequence",
                        "particles": [
                            { "kind": "element", "type": "Title" },
                            { "kind": "choice", "particles": [
                                { "kind": "element", "type": "Creator" },
                                { "kind": "element", "type": "Contributor" }
                            ]}
                        ]
                    }
                },
                { "name": "Title" }
            ]
        }"#;

        let decl = SchemaDeclaration::from_json_str(json).unwrap();
        assert_eq!(decl.types.len(), 2);
        assert_eq!(decl.target_namespace, None);

        let collection = &decl.types[0];
        assert_eq!(collection.attributes[0].value_type, "xs:IDREFS");
        assert_eq!(collection.attributes[1].value_type, DEFAULT_VALUE_TYPE);
        assert_eq!(collection.attributes[1].use_mode, AttributeUse::Required);
        assert_eq!(collection.attributes[2].default.as_deref(), Some("en"));

        let content = collection.content.as_ref().unwrap();
        assert_eq!(content.particles().len(), 2);
        assert_eq!(
            content.particles()[1],
            ContentModel::choice(vec![
                ContentModel::element("Creator"),
                ContentModel::element("Contributor"),
            ])
        );

        assert_eq!(decl.types[1].content, None);
    }

    #[test]
    fn test_empty_content_is_kept() {
        let json = r#"{ "types": [{ "name": "Group", "content": { "kind": "sequence" } }] }"#;
        let decl = SchemaDeclaration::from_json_str(json).unwrap();
        assert_eq!(decl.types[0].content, Some(ContentModel::sequence(Vec::new())));
    }

    #[test]
    fn test_serialization_omits_defaults() {
        let decl = SchemaDeclaration {
            location: None,
            target_namespace: None,
            types: vec![TypeDeclaration {
                name: "Title".to_string(),
                attributes: Vec::new(),
                content: None,
            }],
        };
        let json = decl.to_json_pretty().unwrap();
        assert!(!json.contains("location"));
        assert!(!json.contains("attributes"));
        assert_eq!(SchemaDeclaration::from_json_str(&json).unwrap(), decl);
    }

    #[test]
    fn test_from_path_sets_location() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        std::fs::write(&path, r#"{ "types": [{ "name": "Title" }] }"#).unwrap();

        let decl = SchemaDeclaration::from_path(&path).unwrap();
        assert_eq!(decl.location, Some(path.display().to_string()));

        let missing = SchemaDeclaration::from_path(dir.path().join("missing.json"));
        assert!(matches!(missing, Err(crate::error::Error::Io(_))));
    }

    #[test]
    fn test_invalid_use_is_rejected() {
        let json = r#"{ "types": [{ "name": "A", "attributes": [{ "name": "x", "use": "prohibited" }] }] }"#;
        assert!(SchemaDeclaration::from_json_str(json).is_err());
    }
}
