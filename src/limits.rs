//! Limits and constraints for schema loading
//!
//! A schema declaration comes from an external collaborator and may be
//! arbitrarily large or deeply nested. These limits are enforced by
//! [`SchemaBuilder`](crate::validators::SchemaBuilder) while types are
//! registered, so a hostile declaration cannot exhaust memory or the stack.

use crate::error::{Error, Result};

/// Schema-load limits configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of types in one schema
    pub max_types: usize,

    /// Maximum number of attributes declared on one type
    pub max_attributes: usize,

    /// Maximum number of containable child types on one container
    pub max_containable_types: usize,

    /// Maximum nesting depth of a content model
    pub max_content_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_types: 100_000,
            max_attributes: 1000,
            max_containable_types: 10_000,
            max_content_depth: 100,
        }
    }
}

impl Limits {
    /// Create a new Limits with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict limits (more restrictive)
    pub fn strict() -> Self {
        Self {
            max_types: 10_000,
            max_attributes: 100,
            max_containable_types: 1000,
            max_content_depth: 20,
        }
    }

    /// Create permissive limits (less restrictive, use with caution)
    pub fn permissive() -> Self {
        Self {
            max_types: 1_000_000,
            max_attributes: 10_000,
            max_containable_types: 100_000,
            max_content_depth: 1000,
        }
    }

    /// Check if the number of types is within limits
    pub fn check_types(&self, count: usize) -> Result<()> {
        check("Type count", count, self.max_types)
    }

    /// Check if the number of attributes on a type is within limits
    pub fn check_attributes(&self, count: usize) -> Result<()> {
        check("Attribute count", count, self.max_attributes)
    }

    /// Check if the number of containable types is within limits
    pub fn check_containable_types(&self, count: usize) -> Result<()> {
        check("Containable type count", count, self.max_containable_types)
    }

    /// Check if a content model depth is within limits
    pub fn check_content_depth(&self, depth: usize) -> Result<()> {
        check("Content model depth", depth, self.max_content_depth)
    }
}

fn check(what: &str, value: usize, max: usize) -> Result<()> {
    if value > max {
        Err(Error::LimitExceeded(format!(
            "{} {} exceeds maximum {}",
            what, value, max
        )))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let limits = Limits::default();
        assert_eq!(limits.max_content_depth, 100);
        assert!(limits.check_content_depth(50).is_ok());
        assert!(limits.check_content_depth(150).is_err());
    }

    #[test]
    fn test_strict_limits() {
        let limits = Limits::strict();
        assert!(limits.max_attributes < Limits::default().max_attributes);
        assert!(limits.check_attributes(101).is_err());
        assert!(limits.check_attributes(100).is_ok());
    }

    #[test]
    fn test_permissive_limits() {
        let limits = Limits::permissive();
        assert!(limits.check_types(500_000).is_ok());
        assert!(Limits::default().check_types(500_000).is_err());
    }

    #[test]
    fn test_limit_error_message() {
        let err = Limits::strict().check_containable_types(1001).unwrap_err();
        assert!(matches!(err, Error::LimitExceeded(_)));
        assert!(err.to_string().contains("Containable type count 1001"));
    }
}
