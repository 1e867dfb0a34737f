//! Type model and containment
//!
//! Schemas are loaded through a [`SchemaBuilder`], frozen into a [`Schema`],
//! and published in a [`SchemaRegistry`]. Published types are immutable.

pub mod attributes;
pub mod builders;
pub mod elements;
pub mod globals;
pub mod schemas;

pub use attributes::AttributeSpec;
pub use builders::SchemaBuilder;
pub use elements::{ContainerTypeSpec, ElementTypeSpec, TypeRef, TypeSpec};
pub use globals::SchemaRegistry;
pub use schemas::{Schema, SchemaId};
