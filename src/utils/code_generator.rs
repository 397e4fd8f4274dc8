//! Short code generation and validation utilities.
//!
//! Codes are drawn uniformly from the base62 alphabet. At [`CODE_LENGTH`]
//! characters that is 62^8 (about 2.2e14) possible codes, so collisions are rare
//! and handled by retrying the insert.

use crate::error::AppError;
use rand::{Rng, distr::Alphanumeric};
use serde_json::json;

/// Number of characters in a generated code.
pub const CODE_LENGTH: usize = 8;

/// Upper bound for codes accepted on the redirect path.
pub const MAX_CODE_LENGTH: usize = 64;

/// Generates a random base62 short code.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 8);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(CODE_LENGTH)
        .map(char::from)
        .collect()
}

/// Validates a short code taken from a redirect request.
///
/// Surrounding whitespace is ignored. Returns the trimmed code.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the code is empty or longer than
/// [`MAX_CODE_LENGTH`].
pub fn validate_code(code: &str) -> Result<&str, AppError> {
    let code = code.trim();

    if code.is_empty() {
        return Err(AppError::bad_request("Invalid code", json!({})));
    }

    if code.len() > MAX_CODE_LENGTH {
        return Err(AppError::bad_request(
            "Invalid code",
            json!({ "provided_length": code.len(), "max_length": MAX_CODE_LENGTH }),
        ));
    }

    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_correct_length() {
        let code = generate_code();
        assert_eq!(code.len(), CODE_LENGTH);
    }

    #[test]
    fn test_generate_code_base62_characters() {
        for _ in 0..100 {
            let code = generate_code();
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let mut codes = HashSet::new();

        for _ in 0..1000 {
            codes.insert(generate_code());
        }

        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_validate_code_trims() {
        assert_eq!(validate_code("  abc123  ").unwrap(), "abc123");
    }

    #[test]
    fn test_validate_code_empty() {
        assert!(matches!(
            validate_code("").unwrap_err(),
            AppError::Validation { .. }
        ));
        assert!(matches!(
            validate_code("   ").unwrap_err(),
            AppError::Validation { .. }
        ));
    }

    #[test]
    fn test_validate_code_too_long() {
        let code = "a".repeat(MAX_CODE_LENGTH + 1);
        assert!(validate_code(&code).is_err());

        let code = "a".repeat(MAX_CODE_LENGTH);
        assert!(validate_code(&code).is_ok());
    }
}
