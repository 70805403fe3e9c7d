//! URL validation and normalization.
//!
//! Validation decides whether the submitted text is a URL at all; it accepts
//! input without a scheme (`example.com/a`). Normalization is a single rule:
//! prepend `https://` when no `http://` or `https://` prefix is present.
//! Nothing else is canonicalized (case, trailing slash, query order and
//! fragments are stored exactly as submitted).

use url::{Host, Url};

/// Scheme prepended to URLs submitted without one.
pub const DEFAULT_SCHEME: &str = "https://";

/// Longest URL accepted for shortening.
pub const MAX_URL_LENGTH: usize = 2084;

/// Reasons a submitted URL is rejected.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL is empty")]
    Empty,

    #[error("URL exceeds {MAX_URL_LENGTH} characters")]
    TooLong,

    #[error("URL must not contain whitespace")]
    Whitespace,

    #[error("URL must not contain control characters")]
    ControlCharacter,

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("URL host must be an IP address or a domain with a top-level domain")]
    InvalidHost,
}

/// Checks that `input` is a syntactically valid web URL.
///
/// # Rules
///
/// - Non-empty, at most [`MAX_URL_LENGTH`] characters, no whitespace or
///   control characters (they cannot be sent back in a `Location` header)
/// - Scheme, when present, is `http` or `https` (case-insensitive)
/// - Parses as a URL once the default scheme is applied
/// - Host is an IP address or a domain whose last label is alphabetic
///   (or an IDN `xn--` label)
///
/// # Errors
///
/// Returns the first [`UrlValidationError`] that applies.
pub fn validate_url(input: &str) -> Result<(), UrlValidationError> {
    if input.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    if input.len() > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong);
    }

    if input.chars().any(char::is_whitespace) {
        return Err(UrlValidationError::Whitespace);
    }

    if input.chars().any(char::is_control) {
        return Err(UrlValidationError::ControlCharacter);
    }

    if !has_http_scheme(input) && has_foreign_scheme(input) {
        return Err(UrlValidationError::UnsupportedProtocol);
    }

    let url = Url::parse(&with_default_scheme(input))
        .map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.host() {
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => Ok(()),
        Some(Host::Domain(domain)) if has_valid_tld(domain) => Ok(()),
        _ => Err(UrlValidationError::InvalidHost),
    }
}

/// Prepends [`DEFAULT_SCHEME`] unless `input` already starts with
/// `http://` or `https://`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_url("example.com/a"), "https://example.com/a");
/// assert_eq!(normalize_url("http://example.com"), "http://example.com");
/// ```
pub fn normalize_url(input: &str) -> String {
    with_default_scheme(input).into_owned()
}

fn with_default_scheme(input: &str) -> std::borrow::Cow<'_, str> {
    if has_http_scheme(input) {
        input.into()
    } else {
        format!("{DEFAULT_SCHEME}{input}").into()
    }
}

fn has_http_scheme(input: &str) -> bool {
    starts_with_ignore_case(input, "http://") || starts_with_ignore_case(input, "https://")
}

fn starts_with_ignore_case(input: &str, prefix: &str) -> bool {
    input
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Detects an explicit non-HTTP scheme such as `ftp://` or `javascript:`.
///
/// `host:port` input (`localhost:8080/x`) is not a scheme: a scheme is never
/// followed by a digit. Neither is `user:pass@host` userinfo, recognized by an
/// `@` ahead of the first `/`.
fn has_foreign_scheme(input: &str) -> bool {
    let Some((scheme, rest)) = input.split_once(':') else {
        return false;
    };

    let authority = rest.split('/').next().unwrap_or_default();
    if authority.contains('@') {
        return false;
    }

    let mut chars = scheme.chars();
    let looks_like_scheme = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-'));

    looks_like_scheme && !rest.starts_with(|c: char| c.is_ascii_digit())
}

fn has_valid_tld(domain: &str) -> bool {
    let Some((_, tld)) = domain.trim_end_matches('.').rsplit_once('.') else {
        return false;
    };

    tld.starts_with("xn--") || (tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()))
}
