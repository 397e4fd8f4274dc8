//! Short code resolution with a cache-aside read path.
//!
//! # Request Flow
//!
//! 1. Validate the code
//! 2. Probe the cache. A hit returns immediately and does **not** count a click
//! 3. On a miss, read the store. Unknown codes end here with `NotFound`
//! 4. Increment the click counter in the store
//! 5. Populate the cache with the configured TTL
//! 6. Return the long URL
//!
//! # Click accounting
//!
//! Clicks are counted only on cache misses, so under warm-cache traffic the
//! counter reflects roughly one click per TTL window per code. Writing through on
//! every hit would put the store back on the hot path the cache exists to avoid.
//!
//! Concurrent misses on one cold code each increment and each populate the
//! cache. The cache value is identical for all of them, and the counter only ever
//! grows, so no coordination is attempted.
//!
//! # Failure handling
//!
//! - Cache errors and cache timeouts are treated as misses
//! - A failed cache write is logged and ignored
//! - A failed click increment is logged and ignored; the URL is still returned
//! - Store read failures and timeouts are returned as `StoreUnavailable`

use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use serde_json::json;
use tracing::{debug, warn};

use super::with_store_timeout;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{CacheError, CacheResult, CacheService};
use crate::utils::code_generator::validate_code;

const REDIRECT_CACHE_HITS_TOTAL: &str = "redirect_cache_hits_total";
const REDIRECT_CACHE_MISSES_TOTAL: &str = "redirect_cache_misses_total";
const REDIRECT_CACHE_ERRORS_TOTAL: &str = "redirect_cache_errors_total";
const REDIRECT_CLICK_UPDATE_FAILURES_TOTAL: &str = "redirect_click_update_failures_total";

/// Lifetimes and deadlines used on the redirect path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// How long a populated cache entry lives.
    pub ttl: Duration,
    /// Deadline for each cache call.
    pub cache_timeout: Duration,
    /// Deadline for each store call.
    pub store_timeout: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(3600),
            cache_timeout: Duration::from_millis(250),
            store_timeout: Duration::from_secs(2),
        }
    }
}

/// Resolves short codes to long URLs.
pub struct RedirectService<R: UrlRepository + ?Sized> {
    repository: Arc<R>,
    cache: Arc<dyn CacheService>,
    policy: CachePolicy,
}

impl<R: UrlRepository + ?Sized> RedirectService<R> {
    /// Creates a new redirect service.
    pub fn new(repository: Arc<R>, cache: Arc<dyn CacheService>, policy: CachePolicy) -> Self {
        Self {
            repository,
            cache,
            policy,
        }
    }

    /// Resolves `code` to its long URL.
    ///
    /// See the module documentation for the full protocol.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the code is empty or too long.
    /// Returns [`AppError::NotFound`] if no record exists for the code.
    /// Returns [`AppError::StoreUnavailable`] if the store read fails on a cache miss.
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        let code = validate_code(code)?;

        if let Some(long_url) = self.probe_cache(code).await {
            counter!(REDIRECT_CACHE_HITS_TOTAL).increment(1);
            debug!("Cache HIT for {}", code);
            return Ok(long_url);
        }

        counter!(REDIRECT_CACHE_MISSES_TOTAL).increment(1);
        debug!("Cache MISS for {}", code);

        let record = with_store_timeout(
            self.policy.store_timeout,
            "find_by_code",
            self.repository.find_by_code(code),
        )
        .await?
        .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))?;

        // Must run before the cache write so the request that warms the cache is counted.
        self.count_click(code).await;

        self.populate_cache(code, &record.long_url).await;

        Ok(record.long_url)
    }

    async fn probe_cache(&self, code: &str) -> Option<String> {
        match self.bounded_cache_call(self.cache.get_url(code)).await {
            Ok(hit) => hit,
            Err(e) => {
                counter!(REDIRECT_CACHE_ERRORS_TOTAL).increment(1);
                warn!("Cache read failed for {}, treating as miss: {}", code, e);
                None
            }
        }
    }

    async fn count_click(&self, code: &str) {
        let result = with_store_timeout(
            self.policy.store_timeout,
            "increment_clicks",
            self.repository.increment_clicks(code),
        )
        .await;

        if let Err(e) = result {
            counter!(REDIRECT_CLICK_UPDATE_FAILURES_TOTAL).increment(1);
            warn!("Failed to record click for {}: {}", code, e);
        }
    }

    async fn populate_cache(&self, code: &str, long_url: &str) {
        let ttl_seconds = self.policy.ttl.as_secs().max(1);
        let result = self
            .bounded_cache_call(self.cache.set_url(code, long_url, ttl_seconds))
            .await;

        if let Err(e) = result {
            counter!(REDIRECT_CACHE_ERRORS_TOTAL).increment(1);
            warn!("Failed to cache URL for {}: {}", code, e);
        }
    }

    async fn bounded_cache_call<T>(
        &self,
        fut: impl Future<Output = CacheResult<T>>,
    ) -> CacheResult<T> {
        tokio::time::timeout(self.policy.cache_timeout, fut)
            .await
            .unwrap_or_else(|_| Err(CacheError::Timeout(self.policy.cache_timeout.as_millis())))
    }
}
