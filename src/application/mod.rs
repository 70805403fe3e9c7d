//! Application layer services implementing business logic.
//!
//! Services consume the [`crate::domain::repositories::MappingRepository`]
//! trait and give HTTP handlers and the admin CLI a storage-agnostic API.
//!
//! # Available Services
//!
//! - [`services::shortener_service::ShortenerService`] - Validation, dedup and short link creation
//! - [`services::redirect_service::RedirectService`] - Redirect lookup, click scheduling and stats
//! - [`services::uniqueness_resolver::UniquenessResolver`] - Collision-checked code allocation

pub mod services;
