//! Cache service trait and error types.

use async_trait::async_trait;

/// Errors that can occur during cache operations.
///
/// These never reach HTTP callers. The redirect path treats every one of them as
/// a cache miss.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),

    #[error("Cache operation error: {0}")]
    OperationError(String),

    #[error("Cache operation timed out after {0}ms")]
    Timeout(u128),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Ephemeral short code to long URL mapping.
///
/// Entries hold only the long URL, never the click counter. An entry may vanish at
/// any time and must be treated as absent once its TTL has passed.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the long URL for a short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` on cache hit
    /// - `Ok(None)` on cache miss
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the backend fails. Callers treat this as a miss.
    async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>>;

    /// Stores a mapping that expires after `ttl_seconds`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the backend fails. The write is best-effort and
    /// callers must not fail a request because of it.
    async fn set_url(
        &self,
        short_code: &str,
        long_url: &str,
        ttl_seconds: u64,
    ) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;

    /// Short backend name for health reporting.
    fn backend(&self) -> &'static str;
}
