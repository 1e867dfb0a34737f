//! Ordered, first-match-wins composition of resolvers
//!
//! Chain membership may change while other threads resolve. Members live in
//! an immutable snapshot behind an [`ArcSwap`]: a resolution call loads the
//! snapshot once and iterates it without locking, and every mutation
//! publishes a modified copy. A call in progress therefore always sees the
//! chain exactly as it was when the call started.

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;

use super::{HandleProxyResolver, IdentifierResolver, RelativeLocationResolver};
use crate::error::{ResolutionError, Result};
use crate::handles::HandleNormalizer;
use crate::locations::{BaseLocation, Reference, ResolvedLocation};

/// Ordered list of resolvers tried until one accepts the identifier
pub struct ResolverChain {
    resolvers: ArcSwap<Vec<IdentifierResolver>>,
    normalizer: HandleNormalizer,
}

impl ResolverChain {
    /// Create a chain with the given resolvers, tried in order
    pub fn new(resolvers: Vec<IdentifierResolver>) -> Self {
        Self {
            resolvers: ArcSwap::from_pointee(resolvers),
            normalizer: HandleNormalizer::default(),
        }
    }

    /// Create a chain without resolvers
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Use a normalizer with a different proxy prefix for identifier strings
    pub fn with_normalizer(mut self, normalizer: HandleNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// The normalizer applied by [`resolve_identifier`](Self::resolve_identifier)
    pub fn normalizer(&self) -> &HandleNormalizer {
        &self.normalizer
    }

    /// Current members, in order
    pub fn snapshot(&self) -> Arc<Vec<IdentifierResolver>> {
        self.resolvers.load_full()
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.resolvers.load().len()
    }

    /// Check if the chain has no members
    pub fn is_empty(&self) -> bool {
        self.resolvers.load().is_empty()
    }

    /// Add a resolver at the end
    pub fn append(&self, resolver: impl Into<IdentifierResolver>) {
        let resolver = resolver.into();
        tracing::debug!(resolver = resolver.name(), "appending resolver");
        self.resolvers.rcu(|current| {
            let mut next = Vec::clone(current);
            next.push(resolver.clone());
            next
        });
    }

    /// Insert a resolver at `index`, or at the end if `index` is past it
    pub fn insert(&self, index: usize, resolver: impl Into<IdentifierResolver>) {
        let resolver = resolver.into();
        tracing::debug!(resolver = resolver.name(), index, "inserting resolver");
        self.resolvers.rcu(|current| {
            let mut next = Vec::clone(current);
            next.insert(index.min(next.len()), resolver.clone());
            next
        });
    }

    /// Remove every member equal to `resolver`; returns whether any was removed
    pub fn remove(&self, resolver: &IdentifierResolver) -> bool {
        let mut removed = false;
        self.resolvers.rcu(|current| {
            let next: Vec<IdentifierResolver> =
                current.iter().filter(|r| *r != resolver).cloned().collect();
            removed = next.len() != current.len();
            next
        });
        if removed {
            tracing::debug!(resolver = resolver.name(), "removed resolver");
        }
        removed
    }

    /// Replace all members at once
    pub fn replace(&self, resolvers: Vec<IdentifierResolver>) {
        self.resolvers.store(Arc::new(resolvers));
    }

    /// Check if any member accepts the identifier
    pub fn can_resolve(&self, base: Option<&Reference>, identifier: &Reference) -> bool {
        self.resolvers
            .load()
            .iter()
            .any(|r| r.can_resolve(base, identifier))
    }

    /// Resolve with the first member that accepts the identifier
    ///
    /// Returns `Ok(None)` when no member accepts it. When a member accepts it,
    /// its result is final: a failure is returned as is and later members are
    /// not consulted.
    pub fn resolve(
        &self,
        base: Option<&Reference>,
        identifier: &Reference,
    ) -> std::result::Result<Option<ResolvedLocation>, ResolutionError> {
        let resolvers = self.resolvers.load();
        match resolvers.iter().find(|r| r.can_resolve(base, identifier)) {
            Some(resolver) => {
                tracing::debug!(
                    resolver = resolver.name(),
                    identifier = identifier.as_str(),
                    "resolver selected"
                );
                resolver.resolve(base, identifier).map(Some)
            }
            None => {
                tracing::trace!(identifier = identifier.as_str(), "no resolver accepts identifier");
                Ok(None)
            }
        }
    }

    /// Resolve an identifier string found in a document
    ///
    /// Strings that are handles in any accepted form are canonicalized to
    /// `hdl:` first. Note that a relative path with exactly one `/` is
    /// indistinguishable from a bare handle; call [`resolve`](Self::resolve)
    /// with a parsed [`Reference`] to bypass normalization.
    pub fn resolve_identifier<D>(&self, document: &D, identifier: &str) -> Result<Option<ResolvedLocation>>
    where
        D: BaseLocation + ?Sized,
    {
        let reference = match self.normalizer.normalize(identifier) {
            Some(handle) => Reference::Absolute(handle),
            None => Reference::parse(identifier)?,
        };
        Ok(self.resolve(document.base_location(), &reference)?)
    }
}

impl Default for ResolverChain {
    /// Relative locations first, so `http`, `https`, and `file` identifiers
    /// are never taken for handles
    fn default() -> Self {
        Self::new(vec![
            RelativeLocationResolver::new().into(),
            HandleProxyResolver::new().into(),
        ])
    }
}

impl Clone for ResolverChain {
    fn clone(&self) -> Self {
        Self {
            resolvers: ArcSwap::new(self.snapshot()),
            normalizer: self.normalizer.clone(),
        }
    }
}

impl fmt::Debug for ResolverChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverChain")
            .field("resolvers", &self.snapshot())
            .field("normalizer", &self.normalizer)
            .finish()
    }
}
