//! Resolution settings
//!
//! The handle proxy and the relative-resolution mode are the only knobs of
//! the resolution layer. `Settings` validates them once and hands out
//! normalizers, resolvers, and chains that agree with each other.

use url::Url;

use crate::error::{Error, Result};
use crate::handles::{HandleNormalizer, HANDLE_PROXY_PREFIX};
use crate::resolvers::{HandleProxyResolver, RelativeLocationResolver, RelativeMode, ResolverChain};

/// Validated resolution configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    handle_proxy: Url,
    relative_mode: RelativeMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            handle_proxy: HandleProxyResolver::new().proxy().clone(),
            relative_mode: RelativeMode::default(),
        }
    }
}

impl Settings {
    /// Create settings for the public handle proxy
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different handle proxy
    ///
    /// The proxy must be an `http` or `https` location with a host and
    /// nothing after the authority but `/`.
    pub fn with_handle_proxy(mut self, proxy: &str) -> Result<Self> {
        let url = Url::parse(proxy)?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Value(format!(
                "Handle proxy '{}' must use http or https",
                proxy
            )));
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(Error::Value(format!("Handle proxy '{}' has no host", proxy)));
        }
        if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
            return Err(Error::Value(format!(
                "Handle proxy '{}' must not carry a path, query, or fragment",
                proxy
            )));
        }

        self.handle_proxy = url;
        Ok(self)
    }

    /// Set how relative identifiers are accepted
    pub fn with_relative_mode(mut self, mode: RelativeMode) -> Self {
        self.relative_mode = mode;
        self
    }

    /// The configured handle proxy
    pub fn handle_proxy(&self) -> &Url {
        &self.handle_proxy
    }

    /// The configured relative-resolution mode
    pub fn relative_mode(&self) -> RelativeMode {
        self.relative_mode
    }

    /// Check if the public handle proxy is in use
    pub fn uses_public_proxy(&self) -> bool {
        self.handle_proxy.as_str() == HANDLE_PROXY_PREFIX
    }

    /// Normalizer stripping the configured proxy prefix
    pub fn normalizer(&self) -> HandleNormalizer {
        HandleNormalizer::with_proxy_prefix(self.handle_proxy.as_str())
    }

    /// Resolver for web, file, and relative locations
    pub fn relative_resolver(&self) -> RelativeLocationResolver {
        RelativeLocationResolver::with_mode(self.relative_mode)
    }

    /// Resolver for `hdl:` identifiers
    pub fn handle_proxy_resolver(&self) -> HandleProxyResolver {
        HandleProxyResolver::with_proxy(self.handle_proxy.clone())
    }

    /// Default chain: relative locations, then handles
    pub fn default_chain(&self) -> ResolverChain {
        ResolverChain::new(vec![
            self.relative_resolver().into(),
            self.handle_proxy_resolver().into(),
        ])
        .with_normalizer(self.normalizer())
    }
}
