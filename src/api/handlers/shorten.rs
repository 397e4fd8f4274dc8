//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates (or returns the existing) short link for a long URL.
///
/// # Endpoint
///
/// `POST /api/url/shorten`
///
/// # Request Body
///
/// ```json
/// { "longUrl": "example.com/some/page" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "code": "aZ3kP9xQ",
///   "longUrl": "https://example.com/some/page",
///   "shortUrl": "https://s.example.com/aZ3kP9xQ",
///   "clicks": 0,
///   "createdAt": "2025-01-01T00:00:00Z",
///   "updatedAt": "2025-01-01T00:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 401 if the long URL is invalid, including bodies that are not JSON or
/// whose `longUrl` is not a string.
/// Returns 500 if the store is unavailable.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        AppError::invalid_url(
            "Invalid long URL",
            json!({ "reason": rejection.body_text() }),
        )
    })?;

    payload.validate().map_err(|e| {
        AppError::invalid_url("Invalid long URL", json!({ "reason": e.to_string() }))
    })?;

    let record = state.shorten_service.shorten(&payload.long_url).await?;

    Ok(Json(record.into()))
}
