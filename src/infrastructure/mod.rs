//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain and application layers,
//! providing concrete implementations for data persistence and caching.
//!
//! # Modules
//!
//! - [`cache`] - Caching abstractions (Redis and no-op implementations)
//! - [`persistence`] - PostgreSQL repository implementation

pub mod cache;
pub mod persistence;
