//! Repository trait for URL mapping storage.

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Storage interface for short code mappings.
///
/// All coordination between concurrent requests is delegated to the store:
/// short code uniqueness is enforced by a unique index and click counting is
/// a single atomic increment.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMappingRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_mapping.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Finds the oldest mapping whose original URL equals `original_url` exactly.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn find_by_original_url(&self, original_url: &str)
    -> Result<Option<UrlMapping>, AppError>;

    /// Finds a mapping by its short code (case-sensitive).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn find_by_short_code(&self, short_code: &str) -> Result<Option<UrlMapping>, AppError>;

    /// Inserts a new mapping with `click_count = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CodeCollision`] if the short code is already taken.
    /// Returns [`AppError::StoreUnavailable`] on other database errors.
    async fn insert(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError>;

    /// Atomically adds one to the click counter of mapping `id`.
    ///
    /// Returns `Ok(false)` if no mapping has that id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn increment_click_count(&self, id: Uuid) -> Result<bool, AppError>;

    /// Checks that the store answers queries.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] if the store is unreachable.
    async fn ping(&self) -> Result<(), AppError>;
}
