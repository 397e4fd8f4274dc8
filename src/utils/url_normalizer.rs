//! Long URL normalization.
//!
//! User input is accepted with or without a scheme. The stored form is canonical
//! so that `example.com/x` and `https://EXAMPLE.com:443/x#top` share one record.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Longest long URL accepted, in bytes after normalization.
pub const MAX_URL_LENGTH: usize = 2048;

static HTTP_SCHEME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://").expect("static regex is valid"));

static ANY_SCHEME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z][a-z0-9+.-]*://").expect("static regex is valid")
});

/// Errors that can occur during URL normalization.
#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("URL is empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL has no host")]
    MissingHost,

    #[error("URL exceeds {MAX_URL_LENGTH} characters")]
    TooLong,

    #[error("Failed to normalize URL: {0}")]
    NormalizationFailed(String),
}

/// Normalizes user input into the canonical long URL that is stored.
///
/// # Rules
///
/// 1. Surrounding whitespace is trimmed
/// 2. `https://` is prepended unless the input starts with `http://` or `https://`;
///    any other `scheme://` prefix is rejected
/// 3. The result must parse as an absolute http(s) URL with a host
/// 4. Then [`normalize_url`] applies
///
/// # Examples
///
/// ```ignore
/// assert_eq!(
///     normalize_long_url(" example.com/x ").unwrap(),
///     "https://example.com/x"
/// );
/// ```
pub fn normalize_long_url(input: &str) -> Result<String, UrlNormalizationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlNormalizationError::Empty);
    }

    let with_scheme = if HTTP_SCHEME_REGEX.is_match(trimmed) {
        trimmed.to_string()
    } else if ANY_SCHEME_REGEX.is_match(trimmed) {
        return Err(UrlNormalizationError::UnsupportedProtocol);
    } else {
        format!("https://{trimmed}")
    };

    let normalized = normalize_url(&with_scheme)?;
    if normalized.len() > MAX_URL_LENGTH {
        return Err(UrlNormalizationError::TooLong);
    }

    Ok(normalized)
}

/// Normalizes an absolute URL to a canonical form.
///
/// # Normalization Rules
///
/// 1. **Protocol**: Only HTTP and HTTPS are allowed
/// 2. **Hostname**: Converted to lowercase
/// 3. **Default ports**: Removed (80 for HTTP, 443 for HTTPS)
/// 4. **Fragments**: Removed (e.g., `#section`)
/// 5. **Query parameters** and **path**: Preserved as-is
///
/// # Errors
///
/// Returns [`UrlNormalizationError::InvalidFormat`] for malformed URLs.
/// Returns [`UrlNormalizationError::UnsupportedProtocol`] for non-HTTP(S) schemes.
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let mut url =
        Url::parse(input).map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlNormalizationError::UnsupportedProtocol),
    }

    let host = url
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or(UrlNormalizationError::MissingHost)?
        .to_ascii_lowercase();
    url.set_host(Some(&host)).map_err(|_| {
        UrlNormalizationError::NormalizationFailed("Failed to set normalized host".to_string())
    })?;

    url.set_fragment(None);

    let is_default_port = matches!(
        (url.scheme(), url.port()),
        ("http", Some(80)) | ("https", Some(443))
    );
    if is_default_port {
        url.set_port(None).map_err(|_| {
            UrlNormalizationError::NormalizationFailed("Failed to remove default port".to_string())
        })?;
    }

    Ok(url.to_string())
}
