//! Identifiers and resolved locations
//!
//! Documents reference external resources by identifier strings which may be
//! absolute (`http://…`, `file:…`, `hdl:…`) or relative (`../schema.xsd`).
//! [`Reference`] keeps that distinction explicit since [`Url`] can only hold
//! absolute values. A [`ResolvedLocation`] is always absolute and
//! dereferenceable.

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::error::{Error, Result};

/// Schemes a resolved location may use
pub const DEREFERENCEABLE_SCHEMES: [&str; 3] = ["http", "https", "file"];

/// Check if a URL uses a dereferenceable scheme
pub fn is_dereferenceable(url: &Url) -> bool {
    DEREFERENCEABLE_SCHEMES.contains(&url.scheme())
}

/// An absolute or relative reference found in document content
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Reference {
    /// Absolute URI (has a scheme)
    Absolute(Url),
    /// Relative reference, kept verbatim
    Relative(String),
}

impl Reference {
    /// Parse a reference; strings without a scheme are relative
    pub fn parse(s: &str) -> Result<Self> {
        match Url::parse(s) {
            Ok(url) => Ok(Reference::Absolute(url)),
            Err(url::ParseError::RelativeUrlWithoutBase) => Ok(Reference::Relative(s.to_string())),
            Err(e) => Err(Error::Url(e)),
        }
    }

    /// Check if this reference is absolute
    pub fn is_absolute(&self) -> bool {
        matches!(self, Reference::Absolute(_))
    }

    /// Scheme of an absolute reference (always lower-case)
    pub fn scheme(&self) -> Option<&str> {
        match self {
            Reference::Absolute(url) => Some(url.scheme()),
            Reference::Relative(_) => None,
        }
    }

    /// Get the absolute URL if there is one
    pub fn as_url(&self) -> Option<&Url> {
        match self {
            Reference::Absolute(url) => Some(url),
            Reference::Relative(_) => None,
        }
    }

    /// Get the reference as a string
    pub fn as_str(&self) -> &str {
        match self {
            Reference::Absolute(url) => url.as_str(),
            Reference::Relative(s) => s,
        }
    }
}

impl FromStr for Reference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Reference::parse(s)
    }
}

impl From<Url> for Reference {
    fn from(url: Url) -> Self {
        Reference::Absolute(url)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An absolute, dereferenceable location produced by a resolver
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedLocation(Url);

impl ResolvedLocation {
    /// Wrap a URL; `None` unless it is dereferenceable
    pub fn new(url: Url) -> Option<Self> {
        is_dereferenceable(&url).then_some(ResolvedLocation(url))
    }

    /// Location scheme
    pub fn scheme(&self) -> &str {
        self.0.scheme()
    }

    /// Authority (host and port), empty for host-less `file` locations
    pub fn authority(&self) -> String {
        match (self.0.host_str(), self.0.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => String::new(),
        }
    }

    /// Location path
    pub fn path(&self) -> &str {
        self.0.path()
    }

    /// Borrow the underlying URL
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Take the underlying URL
    pub fn into_url(self) -> Url {
        self.0
    }

    /// Get the location as a string
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ResolvedLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// The one accessor the resolution layer needs from a document
pub trait BaseLocation {
    /// Where the document lives, used to resolve relative identifiers
    fn base_location(&self) -> Option<&Reference>;
}

impl BaseLocation for Reference {
    fn base_location(&self) -> Option<&Reference> {
        Some(self)
    }
}

impl BaseLocation for Option<Reference> {
    fn base_location(&self) -> Option<&Reference> {
        self.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_absolute() {
        let reference = Reference::parse("http://example.com/schema.xsd").unwrap();
        assert!(reference.is_absolute());
        assert_eq!(reference.scheme(), Some("http"));
    }

    #[test]
    fn test_parse_relative() {
        let reference = Reference::parse("../profiles/collection.xsd").unwrap();
        assert_eq!(
            reference,
            Reference::Relative("../profiles/collection.xsd".to_string())
        );
        assert_eq!(reference.scheme(), None);
    }

    #[test]
    fn test_parse_handle_is_absolute() {
        let reference = Reference::parse("hdl:123-456").unwrap();
        assert_eq!(reference.scheme(), Some("hdl"));
    }

    #[test]
    fn test_parse_invalid_absolute() {
        assert!(matches!(
            Reference::parse("http://[::1"),
            Err(Error::Url(_))
        ));
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let reference = Reference::parse("HTTPS://example.com/").unwrap();
        assert_eq!(reference.scheme(), Some("https"));
    }

    #[test]
    fn test_resolved_location_parts() {
        let url = Url::parse("http://hdl.handle.net/1234/5678").unwrap();
        let location = ResolvedLocation::new(url).unwrap();
        assert_eq!(location.scheme(), "http");
        assert_eq!(location.authority(), "hdl.handle.net");
        assert_eq!(location.path(), "/1234/5678");

        let url = Url::parse("http://localhost:8080/a").unwrap();
        assert_eq!(ResolvedLocation::new(url).unwrap().authority(), "localhost:8080");
    }

    #[test]
    fn test_resolved_location_requires_dereferenceable_scheme() {
        assert!(ResolvedLocation::new(Url::parse("hdl:1234/5678").unwrap()).is_none());
        assert!(ResolvedLocation::new(Url::parse("file:///tmp/a.xml").unwrap()).is_some());
    }

    #[test]
    fn test_base_location_accessor() {
        let base = Reference::parse("file:///data/record.xml").unwrap();
        assert_eq!(base.base_location(), Some(&base));

        let none: Option<Reference> = None;
        assert_eq!(none.base_location(), None);
    }
}
