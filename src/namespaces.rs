//! Namespaced names
//!
//! Attributes are identified by their `(namespaceURI, name)` pair. An empty
//! namespace URI means "no namespace" and is stored as `None`, so that
//! `QName::new("", "id")` and `QName::local("id")` are the same key.

use std::fmt;

use crate::error::{Error, Result};

/// XML namespace URI
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Qualified name (QName) - combination of namespace and local name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QName {
    /// Namespace URI (None for no namespace)
    pub namespace: Option<String>,
    /// Local name
    pub local_name: String,
}

impl QName {
    /// Create a QName; an empty namespace URI means no namespace
    pub fn new(namespace_uri: &str, local_name: impl Into<String>) -> Self {
        Self {
            namespace: (!namespace_uri.is_empty()).then(|| namespace_uri.to_string()),
            local_name: local_name.into(),
        }
    }

    /// Create a QName without a namespace
    pub fn local(local_name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local_name: local_name.into(),
        }
    }

    /// Namespace URI, or the empty string when there is none
    pub fn namespace_uri(&self) -> &str {
        self.namespace.as_deref().unwrap_or("")
    }

    /// Parse Clark notation (`{namespace}local` or plain `local`)
    pub fn from_clark(s: &str) -> Result<Self> {
        match s.strip_prefix('{') {
            Some(rest) => {
                let (ns, local) = rest
                    .split_once('}')
                    .ok_or_else(|| Error::Name(format!("Unterminated namespace in '{}'", s)))?;
                if local.is_empty() {
                    return Err(Error::Name(format!("Missing local name in '{}'", s)));
                }
                Ok(Self::new(ns, local))
            }
            None => Ok(Self::local(s)),
        }
    }
}

impl fmt::Display for QName {
    /// Clark notation
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local_name),
            None => write!(f, "{}", self.local_name),
        }
    }
}
