//! Base URL that short URLs are built on.

use std::fmt;

use serde_json::json;
use url::Url;

use crate::error::AppError;

/// An absolute http(s) URL, validated once at startup.
///
/// Holding a `BaseUrl` is proof that the configured value is usable, so the
/// shorten path never has to re-check it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Parses and validates a configured base URL.
    ///
    /// Trailing slashes are dropped so that composition always inserts exactly one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] if the value is not an absolute http(s) URL
    /// with a host, or carries a query or fragment.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let raw = raw.trim();
        let url = Url::parse(raw).map_err(|e| {
            AppError::config(
                "Invalid base URL",
                json!({ "base_url": raw, "reason": e.to_string() }),
            )
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::config(
                "Base URL must use http or https",
                json!({ "base_url": raw }),
            ));
        }

        if url.host_str().is_none_or(str::is_empty) {
            return Err(AppError::config(
                "Base URL must have a host",
                json!({ "base_url": raw }),
            ));
        }

        if url.query().is_some() || url.fragment().is_some() {
            return Err(AppError::config(
                "Base URL must not have a query or fragment",
                json!({ "base_url": raw }),
            ));
        }

        Ok(Self(url.as_str().trim_end_matches('/').to_string()))
    }

    /// Composes the display short URL for `code`.
    pub fn short_url_for(&self, code: &str) -> String {
        format!("{}/{}", self.0, code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
