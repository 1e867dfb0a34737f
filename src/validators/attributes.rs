//! Attribute slots declared on element types
//!
//! An [`AttributeSpec`] is assembled with its `with_*` methods while a schema
//! is being loaded. Once it has been handed to a
//! [`SchemaBuilder`](super::SchemaBuilder) only shared references to it are
//! ever given out, so a published attribute cannot change.

use crate::namespaces::QName;

/// Value type assumed when a declaration does not name one
pub const DEFAULT_VALUE_TYPE: &str = "xs:string";

/// One attribute slot on a type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSpec {
    /// Identity key: namespace URI and local name
    key: QName,
    /// Declared value type, opaque to this crate
    value_type: String,
    /// Whether an instance must carry the attribute
    mandatory: bool,
    /// Value used when the attribute is absent
    default_value: Option<String>,
}

impl AttributeSpec {
    /// Create an optional attribute; an empty namespace URI means no namespace
    pub fn new(namespace_uri: &str, name: impl Into<String>) -> Self {
        Self {
            key: QName::new(namespace_uri, name),
            value_type: DEFAULT_VALUE_TYPE.to_string(),
            mandatory: false,
            default_value: None,
        }
    }

    /// Create an optional attribute without a namespace
    pub fn local(name: impl Into<String>) -> Self {
        Self::new("", name)
    }

    /// Set the declared value type
    pub fn with_value_type(mut self, value_type: impl Into<String>) -> Self {
        self.value_type = value_type.into();
        self
    }

    /// Set whether the attribute is mandatory
    pub fn with_mandatory(mut self, mandatory: bool) -> Self {
        self.mandatory = mandatory;
        self
    }

    /// Set the default value
    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Identity key within the owning type
    pub fn key(&self) -> &QName {
        &self.key
    }

    /// Local name
    pub fn name(&self) -> &str {
        &self.key.local_name
    }

    /// Namespace URI, empty when there is none
    pub fn namespace_uri(&self) -> &str {
        self.key.namespace_uri()
    }

    /// Declared value type tag
    pub fn value_type(&self) -> &str {
        &self.value_type
    }

    /// Check if the attribute is mandatory
    pub fn is_mandatory(&self) -> bool {
        self.mandatory
    }

    /// Default value, if declared
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    /// Check if an instance may omit the attribute
    pub fn is_omittable(&self) -> bool {
        !self.mandatory || self.default_value.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespaces::XML_NAMESPACE;

    #[test]
    fn test_attribute_defaults() {
        let attr = AttributeSpec::local("ComponentId");
        assert_eq!(attr.name(), "ComponentId");
        assert_eq!(attr.namespace_uri(), "");
        assert_eq!(attr.value_type(), DEFAULT_VALUE_TYPE);
        assert!(!attr.is_mandatory());
        assert_eq!(attr.default_value(), None);
    }

    #[test]
    fn test_attribute_builder() {
        let attr = AttributeSpec::new(XML_NAMESPACE, "lang")
            .with_value_type("xs:language")
            .with_mandatory(true)
            .with_default_value("en");

        assert_eq!(attr.key(), &QName::new(XML_NAMESPACE, "lang"));
        assert_eq!(attr.value_type(), "xs:language");
        assert!(attr.is_mandatory());
        assert_eq!(attr.default_value(), Some("en"));
        assert!(attr.is_omittable());
    }

    #[test]
    fn test_mandatory_without_default_is_not_omittable() {
        let attr = AttributeSpec::local("ref").with_mandatory(true);
        assert!(!attr.is_omittable());
    }
}
