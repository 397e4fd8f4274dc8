//! Helpers for classifying PostgreSQL errors.

/// Unique index on `urls.code`.
pub const CODE_CONSTRAINT: &str = "urls_code_key";

/// Unique index on `urls.long_url`.
pub const LONG_URL_CONSTRAINT: &str = "urls_long_url_key";

/// Returns the violated constraint name if `e` is a unique violation.
pub fn unique_violation_constraint(e: &sqlx::Error) -> Option<String> {
    let db_err = e.as_database_error()?;

    if !db_err.is_unique_violation() {
        return None;
    }

    Some(db_err.constraint().unwrap_or_default().to_string())
}
