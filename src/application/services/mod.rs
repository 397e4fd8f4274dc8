//! Business logic services for the application layer.

pub mod redirect_service;
pub mod shorten_service;

pub use redirect_service::{CachePolicy, RedirectService};
pub use shorten_service::ShortenService;

use std::future::Future;
use std::time::Duration;

use serde_json::json;

use crate::error::AppError;

/// Runs a store operation under a deadline.
///
/// An expired deadline is reported as [`AppError::StoreUnavailable`].
pub(crate) async fn with_store_timeout<T, F>(
    limit: Duration,
    operation: &'static str,
    fut: F,
) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => {
            tracing::error!(
                "Store {} timed out after {}ms",
                operation,
                limit.as_millis()
            );
            Err(AppError::store_unavailable(
                "Store operation timed out",
                json!({ "operation": operation, "timeout_ms": limit.as_millis() as u64 }),
            ))
        }
    }
}
