//! URL record entity: the authoritative mapping for one short code.

use chrono::{DateTime, Utc};

/// A shortened URL with its click counter.
///
/// `code`, `long_url` and `short_url` never change after creation. `clicks` only
/// grows and is only written by the redirect path on a cache miss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub code: String,
    pub long_url: String,
    pub short_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UrlRecord {
    /// Creates a new UrlRecord instance.
    pub fn new(
        code: String,
        long_url: String,
        short_url: String,
        clicks: i64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            code,
            long_url,
            short_url,
            clicks,
            created_at,
            updated_at,
        }
    }
}

/// Input data for creating a new record. Clicks start at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlRecord {
    pub code: String,
    pub long_url: String,
    pub short_url: String,
}

impl NewUrlRecord {
    /// Materializes the record as stored at `now`.
    pub fn into_record(self, now: DateTime<Utc>) -> UrlRecord {
        UrlRecord::new(self.code, self.long_url, self.short_url, 0, now, now)
    }
}
