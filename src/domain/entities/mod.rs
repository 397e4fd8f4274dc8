//! Core domain entities.
//!
//! - [`UrlRecord`] - A persisted short code to long URL mapping with its click counter
//! - [`NewUrlRecord`] - Input for creating a record
//! - [`BaseUrl`] - Validated base URL that short URLs are composed from

pub mod base_url;
pub mod url_record;

pub use base_url::BaseUrl;
pub use url_record::{NewUrlRecord, UrlRecord};
