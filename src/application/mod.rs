//! Application layer services implementing business logic.
//!
//! Services consume the [`crate::domain::repositories::UrlRepository`] trait and the
//! [`crate::infrastructure::cache::CacheService`] trait and provide a clean API for
//! HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::shorten_service::ShortenService`] - Idempotent short link creation
//! - [`services::redirect_service::RedirectService`] - Cache-aside resolution with click counting

pub mod services;
