//! Handle identifier recognition and canonicalization
//!
//! A handle is a two-part persistent identifier `prefix/suffix`. Metadata
//! documents carry handles in three surface forms:
//!
//! 1. canonical, `hdl:1234/5678`
//! 2. behind the handle proxy, `http://hdl.handle.net/1234/5678`
//! 3. bare, `1234/5678`
//!
//! [`HandleNormalizer::normalize`] maps all of them to the canonical form.
//! Anything else is a classification miss and yields `None`; callers treat
//! that as "not a handle", never as a failure.
//!
//! Matching is case-insensitive on the scheme and proxy prefix only. The
//! handle body is kept verbatim.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Scheme of canonical handle identifiers
pub const HANDLE_SCHEME: &str = "hdl";

/// Location prefix of the public handle proxy
pub const HANDLE_PROXY_PREFIX: &str = "http://hdl.handle.net/";

/// Exactly one `/` with non-empty segments on both sides
static HANDLE_BODY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^/]+/[^/]+$").expect("handle pattern is valid"));

/// RFC 3986 scheme followed by `:`
static SCHEME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").expect("scheme pattern is valid"));

/// Check whether a string matches the handle grammar
pub fn is_handle_body(s: &str) -> bool {
    HANDLE_BODY.is_match(s)
}

/// Check whether a string starts with a URI scheme
pub fn has_scheme(s: &str) -> bool {
    SCHEME.is_match(s)
}

/// Wrap a handle body into its canonical `hdl:` form
///
/// Returns `None` when the body is not a handle or cannot be carried in an
/// opaque URI without rewriting it.
pub fn wrap(body: &str) -> Option<Url> {
    if !is_handle_body(body) || !is_uri_safe(body) {
        return None;
    }
    Url::parse(&format!("{}:{}", HANDLE_SCHEME, body)).ok()
}

/// Normalize with the public handle proxy prefix
pub fn normalize(identifier: &str) -> Option<Url> {
    HandleNormalizer::default().normalize(identifier)
}

/// Recognizes handle identifiers and converts them to canonical form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandleNormalizer {
    proxy_prefix: String,
}

impl HandleNormalizer {
    /// Create a normalizer for the public handle proxy
    pub fn new() -> Self {
        Self::with_proxy_prefix(HANDLE_PROXY_PREFIX)
    }

    /// Create a normalizer recognizing a different proxy prefix
    ///
    /// The prefix is matched textually, so it should end with `/`.
    pub fn with_proxy_prefix(prefix: impl Into<String>) -> Self {
        Self {
            proxy_prefix: prefix.into(),
        }
    }

    /// The proxy prefix stripped from proxied handles
    pub fn proxy_prefix(&self) -> &str {
        &self.proxy_prefix
    }

    /// Convert any accepted surface form of a handle into `hdl:prefix/suffix`
    pub fn normalize(&self, identifier: &str) -> Option<Url> {
        let canonical_prefix = format!("{}:", HANDLE_SCHEME);
        let normalized = if let Some(body) = strip_prefix_ignore_case(identifier, &canonical_prefix)
        {
            wrap(body)
        } else if let Some(rest) = strip_prefix_ignore_case(identifier, &self.proxy_prefix) {
            self.normalize_bare(rest)
        } else {
            self.normalize_bare(identifier)
        };

        if normalized.is_none() {
            tracing::trace!(identifier, "not a handle");
        }
        normalized
    }

    /// Check whether an identifier is a handle in any accepted form
    pub fn is_handle(&self, identifier: &str) -> bool {
        self.normalize(identifier).is_some()
    }

    fn normalize_bare(&self, identifier: &str) -> Option<Url> {
        if has_scheme(identifier) {
            return None;
        }
        wrap(identifier)
    }
}

impl Default for HandleNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}

/// Characters allowed in an opaque URI part: unreserved, sub-delims, `:`,
/// `@`, `/`, and well-formed percent escapes. Non-ASCII text is rejected
/// because the URL parser would percent-encode it and change the body.
fn is_uri_safe(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let escape = bytes.get(i + 1..i + 3);
                if !matches!(escape, Some(hex) if hex.iter().all(u8::is_ascii_hexdigit)) {
                    return false;
                }
                i += 3;
                continue;
            }
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' => {}
            b'-' | b'.' | b'_' | b'~' => {}
            b'!' | b'$' | b'&' | b'\'' | b'(' | b')' | b'*' | b'+' | b',' | b';' | b'=' => {}
            b':' | b'@' | b'/' => {}
            _ => return false,
        }
        i += 1;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_canonical_form_is_kept() {
        assert_eq!(normalize("hdl:1234/5678"), Some(url("hdl:1234/5678")));
    }

    #[test]
    fn test_bare_form_is_wrapped() {
        assert_eq!(normalize("1234/5678"), Some(url("hdl:1234/5678")));
    }

    #[test]
    fn test_proxy_form_is_stripped() {
        assert_eq!(
            normalize("http://hdl.handle.net/1234/5678"),
            Some(url("hdl:1234/5678"))
        );
    }

    #[test]
    fn test_missing_separator_is_not_a_handle() {
        assert_eq!(normalize("1234"), None);
        assert_eq!(normalize("hdl:1234"), None);
        assert_eq!(normalize("http://hdl.handle.net/1234"), None);
    }

    #[test]
    fn test_extra_separator_is_not_a_handle() {
        assert_eq!(normalize("1234/5678/9"), None);
        assert_eq!(normalize("hdl:1234/5678/9"), None);
        assert_eq!(normalize("/5678"), None);
        assert_eq!(normalize("1234/"), None);
    }

    #[test]
    fn test_scheme_and_prefix_match_ignores_case() {
        assert_eq!(normalize("HDL:1234/5678"), Some(url("hdl:1234/5678")));
        assert_eq!(
            normalize("HTTP://HDL.Handle.NET/1234/5678"),
            Some(url("hdl:1234/5678"))
        );
    }

    #[test]
    fn test_body_case_is_preserved() {
        let handle = normalize("hdl:11858/00-ABCD-0000-efgh").unwrap();
        assert_eq!(handle.path(), "11858/00-ABCD-0000-efgh");

        let handle = normalize("http://hdl.handle.net/11858/00-ABCD").unwrap();
        assert_eq!(handle.path(), "11858/00-ABCD");
    }

    #[test]
    fn test_other_schemes_are_not_handles() {
        assert_eq!(normalize("http://example.com/1234"), None);
        assert_eq!(normalize("urn:1234/5678"), None);
        assert_eq!(normalize("https://hdl.handle.net/1234/5678"), None);
    }

    #[test]
    fn test_invalid_uri_body_is_not_a_handle() {
        assert_eq!(normalize("12 34/5678"), None);
        assert_eq!(normalize("1234/56#78"), None);
        assert_eq!(normalize("1234/56%zz"), None);
        assert_eq!(normalize("hdl:1234/56?78"), None);
    }

    #[test]
    fn test_non_ascii_body_is_not_a_handle() {
        assert_eq!(normalize("1234/Dé"), None);
        assert_eq!(normalize("hdl:1234/Dé"), None);
        assert_eq!(normalize("http://hdl.handle.net/1234/Dé"), None);
        assert_eq!(normalize("1234/D%C3%A9"), Some(url("hdl:1234/D%C3%A9")));
    }

    #[test]
    fn test_absent_input_is_not_a_handle() {
        let absent: Option<&str> = None;
        assert_eq!(absent.and_then(normalize), None);
        assert_eq!(normalize(""), None);
    }

    #[test]
    fn test_custom_proxy_prefix() {
        let normalizer = HandleNormalizer::with_proxy_prefix("https://handle.example.org/");
        assert_eq!(
            normalizer.normalize("https://handle.example.org/1234/5678"),
            Some(url("hdl:1234/5678"))
        );
        assert_eq!(normalizer.normalize("http://hdl.handle.net/1234/5678"), None);
        assert!(normalizer.is_handle("1234/5678"));
    }

    #[test]
    fn test_has_scheme() {
        assert!(has_scheme("hdl:1/2"));
        assert!(has_scheme("http://x"));
        assert!(!has_scheme("10.1000/182"));
        assert!(!has_scheme("1abc:2/3"));
    }
}
