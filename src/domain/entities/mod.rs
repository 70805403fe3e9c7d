//! Core domain entities.
//!
//! The service has a single persisted entity, [`UrlMapping`]. Creation input
//! is carried by the separate [`NewUrlMapping`] struct so that store-assigned
//! fields (`id`, counters, timestamps) can never be supplied by callers.

pub mod url_mapping;

pub use url_mapping::{NewUrlMapping, UrlMapping};
