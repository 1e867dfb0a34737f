//! # metadoc
//!
//! Identifier resolution and schema-driven containment for structured
//! metadata documents.
//!
//! ## Features
//!
//! - Handle identifier normalization (`hdl:`, proxy URL, and bare forms)
//! - Ordered, mutable resolver chains turning identifiers into
//!   dereferenceable locations
//! - Immutable element and container types with declared attributes
//! - Declared containment between types of a loaded schema
//! - JSON schema declarations as the loading hand-off
//! - Resource limits on schema loading
//!
//! ## Example
//!
//! ```rust
//! use metadoc::locations::Reference;
//! use metadoc::resolvers::ResolverChain;
//!
//! let chain = ResolverChain::default();
//! let base = Reference::parse("http://example.com/records/r1.xml")?;
//!
//! let location = chain.resolve_identifier(&base, "logo.png")?.unwrap();
//! assert_eq!(location.as_str(), "http://example.com/records/logo.png");
//!
//! let location = chain.resolve_identifier(&base, "hdl:1839/00-0000-0000-0001")?.unwrap();
//! assert_eq!(location.as_str(), "http://hdl.handle.net/1839/00-0000-0000-0001");
//! # Ok::<(), metadoc::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod limits;

pub mod names;
pub mod namespaces;

pub mod handles;
pub mod locations;
pub mod settings;

pub mod resolvers;

pub mod declarations;
pub mod validators;

pub use error::{Error, Result};

/// Version of the metadoc library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
