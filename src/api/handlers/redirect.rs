//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Resolution goes through [`crate::application::services::RedirectService`]; a
/// cache hit does not count a click.
///
/// # Errors
///
/// Returns 400 Bad Request if the code is empty.
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 500 if the store is unavailable on a cache miss.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let long_url = state.redirect_service.resolve(&code).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, long_url)]).into_response())
}
