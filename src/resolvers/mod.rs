//! Identifier resolution
//!
//! Each resolver is one strategy for turning an identifier found in a
//! document into a dereferenceable location. Resolvers form a closed set of
//! variants; [`ResolverChain`] tries them in order and uses the first one
//! that accepts the identifier.
//!
//! Every variant offers the same two operations. `can_resolve` is a pure
//! predicate. `resolve` may only be called after `can_resolve` returned
//! `true` for the same inputs, and may still fail with a
//! [`ResolutionError`].

pub mod chain;
pub mod handle_proxy;
pub mod relative;

pub use chain::ResolverChain;
pub use handle_proxy::HandleProxyResolver;
pub use relative::{RelativeLocationResolver, RelativeMode};

use crate::error::ResolutionError;
use crate::locations::{Reference, ResolvedLocation};

/// A single resolution strategy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierResolver {
    /// Web, file, and relative locations
    RelativeLocation(RelativeLocationResolver),
    /// `hdl:` identifiers through the handle proxy
    HandleProxy(HandleProxyResolver),
}

impl IdentifierResolver {
    /// Short name used in logs and the CLI
    pub fn name(&self) -> &'static str {
        match self {
            IdentifierResolver::RelativeLocation(_) => "relative-location",
            IdentifierResolver::HandleProxy(_) => "handle-proxy",
        }
    }

    /// Check if this resolver accepts the identifier
    pub fn can_resolve(&self, base: Option<&Reference>, identifier: &Reference) -> bool {
        match self {
            IdentifierResolver::RelativeLocation(r) => r.can_resolve(base, identifier),
            IdentifierResolver::HandleProxy(r) => r.can_resolve(base, identifier),
        }
    }

    /// Resolve the identifier
    pub fn resolve(
        &self,
        base: Option<&Reference>,
        identifier: &Reference,
    ) -> Result<ResolvedLocation, ResolutionError> {
        match self {
            IdentifierResolver::RelativeLocation(r) => r.resolve(base, identifier),
            IdentifierResolver::HandleProxy(r) => r.resolve(base, identifier),
        }
    }
}

impl From<RelativeLocationResolver> for IdentifierResolver {
    fn from(resolver: RelativeLocationResolver) -> Self {
        IdentifierResolver::RelativeLocation(resolver)
    }
}

impl From<HandleProxyResolver> for IdentifierResolver {
    fn from(resolver: HandleProxyResolver) -> Self {
        IdentifierResolver::HandleProxy(resolver)
    }
}
