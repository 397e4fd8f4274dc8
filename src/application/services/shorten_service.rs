//! Short link creation service.

use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use serde_json::json;
use tracing::{debug, info, warn};

use super::with_store_timeout;
use crate::domain::entities::{BaseUrl, NewUrlRecord, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::code_generator::generate_code;
use crate::utils::db_error::{CODE_CONSTRAINT, LONG_URL_CONSTRAINT};
use crate::utils::url_normalizer::normalize_long_url;

const SHORTEN_CREATED_TOTAL: &str = "shorten_created_total";
const SHORTEN_CODE_COLLISIONS_TOTAL: &str = "shorten_code_collisions_total";

/// Insert attempts before code generation gives up.
const MAX_ATTEMPTS: usize = 10;

/// Service for creating shortened links.
///
/// Writes only to the store. The cache is filled lazily by the redirect path.
pub struct ShortenService<R: UrlRepository + ?Sized> {
    repository: Arc<R>,
    base_url: BaseUrl,
    store_timeout: Duration,
}

impl<R: UrlRepository + ?Sized> ShortenService<R> {
    /// Creates a new shorten service.
    ///
    /// `base_url` has already been validated, so shortening never reports a
    /// configuration error.
    pub fn new(repository: Arc<R>, base_url: BaseUrl, store_timeout: Duration) -> Self {
        Self {
            repository,
            base_url,
            store_timeout,
        }
    }

    /// Returns the record for `long_url`, creating it if needed.
    ///
    /// # Idempotence
    ///
    /// The input is normalized first (see [`normalize_long_url`]). If a record for the
    /// normalized URL exists it is returned unchanged, with its current click count.
    ///
    /// # Concurrent creation
    ///
    /// Two requests for the same unseen URL can both miss the lookup. The unique
    /// index on `long_url` rejects the second insert, which is then answered with
    /// the winner's record. A rejection on `code` means the random code collided
    /// and a fresh one is drawn, up to 10 attempts.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidUrl`] if the input is not a usable http(s) URL.
    /// Returns [`AppError::StoreUnavailable`] if the store fails or times out.
    /// Returns [`AppError::Internal`] if no unique code was found.
    pub async fn shorten(&self, long_url: &str) -> Result<UrlRecord, AppError> {
        let long_url = normalize_long_url(long_url).map_err(|e| {
            AppError::invalid_url("Invalid long URL", json!({ "reason": e.to_string() }))
        })?;

        if let Some(existing) = self.find_existing(&long_url).await? {
            debug!("Returning existing code {} for {}", existing.code, long_url);
            return Ok(existing);
        }

        for attempt in 1..=MAX_ATTEMPTS {
            let code = generate_code();
            let new_record = NewUrlRecord {
                short_url: self.base_url.short_url_for(&code),
                code,
                long_url: long_url.clone(),
            };

            let inserted = with_store_timeout(
                self.store_timeout,
                "insert",
                self.repository.insert(new_record),
            )
            .await;

            match inserted {
                Ok(record) => {
                    counter!(SHORTEN_CREATED_TOTAL).increment(1);
                    info!("Created short code {} for {}", record.code, record.long_url);
                    return Ok(record);
                }
                Err(e) if e.conflicting_constraint() == Some(CODE_CONSTRAINT) => {
                    counter!(SHORTEN_CODE_COLLISIONS_TOTAL).increment(1);
                    warn!("Short code collision on attempt {}, retrying", attempt);
                }
                Err(e) if e.conflicting_constraint() == Some(LONG_URL_CONSTRAINT) => {
                    debug!("Concurrent shorten of {}, returning winner", long_url);
                    return self.find_existing(&long_url).await?.ok_or_else(|| {
                        AppError::internal(
                            "Record vanished after duplicate insert",
                            json!({ "long_url": long_url }),
                        )
                    });
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions", "attempts": MAX_ATTEMPTS }),
        ))
    }

    async fn find_existing(&self, long_url: &str) -> Result<Option<UrlRecord>, AppError> {
        with_store_timeout(
            self.store_timeout,
            "find_by_long_url",
            self.repository.find_by_long_url(long_url),
        )
        .await
    }
}
