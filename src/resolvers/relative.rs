//! Resolution of web, file, and relative locations

use crate::error::{ResolutionCause, ResolutionError};
use crate::locations::{is_dereferenceable, Reference, ResolvedLocation};

/// How relative identifiers are accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RelativeMode {
    /// Relative identifiers need an absolute, dereferenceable base
    #[default]
    RequireAbsoluteBase,
    /// Accept every relative identifier and fail later if the base is unusable
    #[deprecated(note = "accepts relative identifiers it cannot resolve; use RequireAbsoluteBase")]
    AcceptAnyRelative,
}

impl RelativeMode {
    #[allow(deprecated)]
    fn is_lenient(self) -> bool {
        self == RelativeMode::AcceptAnyRelative
    }
}

/// Resolves `http`, `https`, and `file` locations, and relative references
/// against the document's base location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RelativeLocationResolver {
    mode: RelativeMode,
}

impl RelativeLocationResolver {
    /// Create a resolver requiring an absolute base for relative identifiers
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver with an explicit mode
    pub fn with_mode(mode: RelativeMode) -> Self {
        if mode.is_lenient() {
            tracing::warn!("relative resolver accepts relative identifiers without a usable base");
        }
        Self { mode }
    }

    /// The configured mode
    pub fn mode(&self) -> RelativeMode {
        self.mode
    }

    /// Check if the identifier can be resolved; never fails
    pub fn can_resolve(&self, base: Option<&Reference>, identifier: &Reference) -> bool {
        match identifier {
            Reference::Absolute(url) => is_dereferenceable(url),
            Reference::Relative(_) if self.mode.is_lenient() => true,
            Reference::Relative(_) => base
                .and_then(Reference::as_url)
                .is_some_and(is_dereferenceable),
        }
    }

    /// Resolve the identifier against the base location
    pub fn resolve(
        &self,
        base: Option<&Reference>,
        identifier: &Reference,
    ) -> Result<ResolvedLocation, ResolutionError> {
        let fail = |cause| ResolutionError::new(identifier.as_str(), cause);

        let relative = match identifier {
            Reference::Absolute(url) => {
                return ResolvedLocation::new(url.clone())
                    .ok_or_else(|| fail(ResolutionCause::UnsupportedScheme(url.scheme().to_string())));
            }
            Reference::Relative(relative) => relative,
        };

        let base_url = match base {
            None => return Err(fail(ResolutionCause::MissingBase)),
            Some(Reference::Relative(base)) => {
                return Err(fail(ResolutionCause::BaseNotAbsolute(base.clone())))
            }
            Some(Reference::Absolute(url)) if !is_dereferenceable(url) => {
                return Err(fail(ResolutionCause::BaseNotDereferenceable(url.to_string())))
            }
            Some(Reference::Absolute(url)) => url,
        };

        let joined = base_url
            .join(relative)
            .map_err(|e| fail(ResolutionCause::InvalidLocation(e)))?;
        let scheme = joined.scheme().to_string();
        ResolvedLocation::new(joined).ok_or_else(|| fail(ResolutionCause::UnsupportedScheme(scheme)))
    }
}
