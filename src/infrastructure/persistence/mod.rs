//! PostgreSQL repository implementation.
//!
//! - [`PgUrlRepository`] - Durable record store for short code mappings

pub mod pg_url_repository;

pub use pg_url_repository::PgUrlRepository;
