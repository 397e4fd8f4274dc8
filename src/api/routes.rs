//! API route configuration.

use crate::api::handlers::shorten_handler;
use crate::state::AppState;
use axum::{Router, routing::post};

/// API routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `POST /url/shorten` - Create or look up the short link for a long URL
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/url/shorten", post(shorten_handler))
}
