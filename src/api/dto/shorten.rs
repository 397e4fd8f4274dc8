//! DTOs for the link shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::UrlRecord;

/// Request to shorten one URL.
///
/// A missing `longUrl` deserializes as an empty string and is rejected by the
/// service like any other invalid URL.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    #[serde(default)]
    #[validate(length(max = 2048, message = "URL is too long"))]
    pub long_url: String,
}

/// The stored record as returned to clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub code: String,
    pub long_url: String,
    pub short_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UrlRecord> for ShortenResponse {
    fn from(record: UrlRecord) -> Self {
        Self {
            code: record.code,
            long_url: record.long_url,
            short_url: record.short_url,
            clicks: record.clicks,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
