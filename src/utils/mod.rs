//! Utility functions for code generation, URL processing, and error classification.
//!
//! - [`code_generator`] - Short code generation
//! - [`url_normalizer`] - Long URL normalization
//! - [`db_error`] - PostgreSQL unique-violation detection

pub mod code_generator;
pub mod db_error;
pub mod url_normalizer;
