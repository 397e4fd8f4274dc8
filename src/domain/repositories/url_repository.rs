//! Repository trait for the durable record store.

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// The store of record for short code mappings.
///
/// Each method is atomic on its own. No multi-call transactions are offered, so a
/// lookup followed by an insert can race with another writer; callers rely on the
/// unique indexes on `code` and `long_url` to detect that.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Finds the record for an exact (normalized) long URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Finds the record for a short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Persists a new record with zero clicks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] when the code or the long URL is already
    /// stored; `details.constraint` names which one
    /// (see [`crate::utils::db_error`]).
    ///
    /// Returns [`AppError::StoreUnavailable`] on other database errors.
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError>;

    /// Adds one to the click counter of `code` and bumps `updated_at`.
    ///
    /// Incrementing an unknown code is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn increment_clicks(&self, code: &str) -> Result<(), AppError>;

    /// Checks if the store answers queries.
    async fn health_check(&self) -> bool;
}
