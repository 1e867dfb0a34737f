//! XML name validation
//!
//! Type names and attribute local names declared by a schema must be
//! NCNames. The loading phase rejects anything else before a type is
//! published.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static NCNAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Z_a-z\u{C0}-\u{D6}\u{D8}-\u{F6}\u{F8}-\u{2FF}\u{370}-\u{37D}\u{37F}-\u{1FFF}][A-Z_a-z\u{C0}-\u{D6}\u{D8}-\u{F6}\u{F8}-\u{2FF}\u{370}-\u{37D}\u{37F}-\u{1FFF}\-\.0-9\u{B7}\u{300}-\u{36F}]*$",
    )
    .expect("NCName pattern is valid")
});

/// Check if a string is a valid NCName (non-colonized name)
pub fn is_valid_ncname(name: &str) -> bool {
    NCNAME.is_match(name)
}

/// Validate an NCName and return an error if invalid
pub fn validate_ncname(name: &str) -> Result<()> {
    if is_valid_ncname(name) {
        Ok(())
    } else {
        Err(Error::Name(format!("Invalid NCName: '{}'", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_ncname() {
        assert!(is_valid_ncname("Component"));
        assert!(is_valid_ncname("my-element"));
        assert!(is_valid_ncname("_ref"));
        assert!(is_valid_ncname("Actor.Role"));
        assert!(is_valid_ncname("Ästhetik"));

        assert!(!is_valid_ncname(""));
        assert!(!is_valid_ncname("cmd:Component"));
        assert!(!is_valid_ncname("123element"));
        assert!(!is_valid_ncname("-element"));
        assert!(!is_valid_ncname("has space"));
    }

    #[test]
    fn test_validate_ncname() {
        assert!(validate_ncname("Header").is_ok());
        assert!(matches!(validate_ncname("1st"), Err(Error::Name(_))));
    }
}
