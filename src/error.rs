//! Error types for metadoc
//!
//! This module defines all error types used throughout the library.
//! Classification misses (an identifier that is not a handle, a chain with
//! no matching resolver) are not errors and are reported as `None` by the
//! relevant APIs instead.

use std::fmt;
use thiserror::Error;

/// Result type alias using metadoc Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for metadoc operations
#[derive(Error, Debug)]
pub enum Error {
    /// Attribute-set or structure validation error
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Error raised while a schema is being loaded
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// A matched resolver could not produce a location
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// Name error (invalid XML name)
    #[error("name error: {0}")]
    Name(String),

    /// Value error (invalid configuration value)
    #[error("value error: {0}")]
    Value(String),

    /// Limit exceeded error
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Declaration (JSON) error
    #[error("declaration error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

/// Validation error with context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error message
    pub message: String,
    /// Type the failing instance was checked against
    pub type_name: Option<String>,
    /// Attribute or child that caused the failure
    pub path: Option<String>,
    /// Underlying reason
    pub reason: Option<String>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            type_name: None,
            path: None,
            reason: None,
        }
    }

    /// Set the type name
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Set the path where validation failed
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the reason
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(ref reason) = self.reason {
            write!(f, "\n\nReason: {}", reason)?;
        }

        if let Some(ref type_name) = self.type_name {
            write!(f, "\n\nType: {}", type_name)?;
        }

        if let Some(ref path) = self.path {
            write!(f, "\n\nPath: {}", path)?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Error raised during the schema-loading phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    /// Error message
    pub message: String,
    /// Location of the schema being loaded
    pub location: Option<String>,
    /// Type declaration that caused the error
    pub type_name: Option<String>,
}

impl SchemaError {
    /// Create a new schema error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
            type_name: None,
        }
    }

    /// Set the location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the offending type
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(ref type_name) = self.type_name {
            write!(f, "\n\nType: {}", type_name)?;
        }

        if let Some(ref loc) = self.location {
            write!(f, "\n\nLocation: {}", loc)?;
        }

        Ok(())
    }
}

impl std::error::Error for SchemaError {}

/// Why a matched resolver failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionCause {
    /// A relative identifier was given without a base location
    #[error("no base location to resolve against")]
    MissingBase,

    /// The base location is itself relative
    #[error("base location '{0}' is not absolute")]
    BaseNotAbsolute(String),

    /// The base location cannot act as a base for relative references
    #[error("base location '{0}' is not dereferenceable")]
    BaseNotDereferenceable(String),

    /// The identifier does not use the handle scheme
    #[error("scheme '{0}' is not a handle scheme")]
    NotAHandle(String),

    /// The identifier or rewritten location is not dereferenceable
    #[error("scheme '{0}' does not name a dereferenceable location")]
    UnsupportedScheme(String),

    /// The handle body would be rewritten by location path normalization
    #[error("handle body '{0}' cannot be carried verbatim in a location path")]
    BodyNotPreserved(String),

    /// The configured handle proxy has no host
    #[error("handle proxy '{0}' has no host")]
    MissingProxyHost(String),

    /// The rewritten location is not a valid URL
    #[error("invalid location: {0}")]
    InvalidLocation(#[from] url::ParseError),
}

/// A resolver accepted an identifier but could not produce a location
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot resolve '{identifier}': {cause}")]
pub struct ResolutionError {
    /// The identifier as it was handed to the resolver
    pub identifier: String,
    /// Underlying cause
    #[source]
    pub cause: ResolutionCause,
}

impl ResolutionError {
    /// Create a new resolution error
    pub fn new(identifier: impl Into<String>, cause: ResolutionCause) -> Self {
        Self {
            identifier: identifier.into(),
            cause,
        }
    }
}
