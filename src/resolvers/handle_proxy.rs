//! Resolution of `hdl:` identifiers through the handle proxy

use once_cell::sync::Lazy;
use url::Url;

use crate::error::{ResolutionCause, ResolutionError};
use crate::handles::{HANDLE_PROXY_PREFIX, HANDLE_SCHEME};
use crate::locations::{Reference, ResolvedLocation};

static DEFAULT_PROXY: Lazy<Url> =
    Lazy::new(|| Url::parse(HANDLE_PROXY_PREFIX).expect("default handle proxy is a valid URL"));

/// Rewrites `hdl:prefix/suffix` to `http://hdl.handle.net/prefix/suffix`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandleProxyResolver {
    proxy: Url,
}

impl HandleProxyResolver {
    /// Create a resolver for the public handle proxy
    pub fn new() -> Self {
        Self {
            proxy: DEFAULT_PROXY.clone(),
        }
    }

    /// Create a resolver for a different proxy
    ///
    /// The proxy is not checked here; a proxy without a host makes every
    /// resolution fail. Use [`Settings`](crate::settings::Settings) to
    /// validate a configured proxy up front.
    pub fn with_proxy(proxy: Url) -> Self {
        Self { proxy }
    }

    /// The proxy identifiers are rewritten to
    pub fn proxy(&self) -> &Url {
        &self.proxy
    }

    /// True only for absolute identifiers with the `hdl` scheme
    pub fn can_resolve(&self, _base: Option<&Reference>, identifier: &Reference) -> bool {
        identifier.scheme() == Some(HANDLE_SCHEME)
    }

    /// Rewrite the handle body onto the proxy
    ///
    /// The body must appear unchanged in the location path. Bodies with `.`
    /// or `..` segments fail with [`ResolutionCause::BodyNotPreserved`].
    pub fn resolve(
        &self,
        _base: Option<&Reference>,
        identifier: &Reference,
    ) -> Result<ResolvedLocation, ResolutionError> {
        let fail = |cause| ResolutionError::new(identifier.as_str(), cause);

        let handle = match identifier {
            Reference::Absolute(url) if url.scheme() == HANDLE_SCHEME => url,
            other => {
                let scheme = other.scheme().unwrap_or_default().to_string();
                return Err(fail(ResolutionCause::NotAHandle(scheme)));
            }
        };

        if self.proxy.host_str().map_or(true, str::is_empty) {
            return Err(fail(ResolutionCause::MissingProxyHost(self.proxy.to_string())));
        }

        let path = format!("/{}", handle.path());
        let mut location = self.proxy.clone();
        location.set_path(&path);
        location.set_query(None);
        location.set_fragment(None);

        // `.` and `..` segments (also as `%2E`) are collapsed by the path parser
        if location.path() != path {
            return Err(fail(ResolutionCause::BodyNotPreserved(handle.path().to_string())));
        }

        let scheme = location.scheme().to_string();
        ResolvedLocation::new(location).ok_or_else(|| fail(ResolutionCause::UnsupportedScheme(scheme)))
    }
}

impl Default for HandleProxyResolver {
    fn default() -> Self {
        Self::new()
    }
}
