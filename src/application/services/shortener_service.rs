//! Short link creation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::services::uniqueness_resolver::UniquenessResolver;
use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;
use crate::utils::code_generator::CodeGenerator;
use crate::utils::url_normalizer::{normalize_url, validate_url};

/// Number of inserts tried when the unique index rejects a freshly resolved code.
pub const MAX_INSERT_ATTEMPTS: usize = 3;

/// Result of [`ShortenerService::shorten`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortenOutcome {
    /// A new mapping was stored.
    Created(UrlMapping),
    /// The normalized URL was already shortened; the stored mapping is returned as-is.
    Existing(UrlMapping),
}

impl ShortenOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    pub fn mapping(&self) -> &UrlMapping {
        match self {
            Self::Created(mapping) | Self::Existing(mapping) => mapping,
        }
    }

    pub fn into_mapping(self) -> UrlMapping {
        match self {
            Self::Created(mapping) | Self::Existing(mapping) => mapping,
        }
    }
}

/// Service for creating short links.
///
/// Handles validation, scheme normalization, deduplication by original URL
/// and collision-safe code allocation.
pub struct ShortenerService<R: MappingRepository, G: CodeGenerator> {
    repository: Arc<R>,
    resolver: UniquenessResolver<G>,
}

impl<R: MappingRepository, G: CodeGenerator> ShortenerService<R, G> {
    pub fn new(repository: Arc<R>, generator: G) -> Self {
        Self::with_resolver(repository, UniquenessResolver::new(generator))
    }

    pub fn with_resolver(repository: Arc<R>, resolver: UniquenessResolver<G>) -> Self {
        Self {
            repository,
            resolver,
        }
    }

    /// Shortens `raw_url`, reusing an existing mapping for the same normalized URL.
    ///
    /// # Flow
    ///
    /// 1. Validate `raw_url` (see [`validate_url`])
    /// 2. Prepend `https://` when no HTTP scheme is present
    /// 3. Return the existing mapping if the normalized URL is already stored
    /// 4. Otherwise resolve a free code and insert a new mapping
    ///
    /// A concurrent request can claim the resolved code between the check and
    /// the insert. The unique index then rejects the insert with
    /// [`AppError::CodeCollision`] and a new code is resolved, up to
    /// [`MAX_INSERT_ATTEMPTS`] times.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidInput`] if the URL is not valid
    /// - [`AppError::CapacityExhausted`] if no free code could be allocated
    /// - [`AppError::StoreUnavailable`] on storage failures
    pub async fn shorten(&self, raw_url: &str) -> Result<ShortenOutcome, AppError> {
        validate_url(raw_url).map_err(|e| {
            debug!(url = %raw_url, reason = %e, "Rejected URL");
            AppError::invalid_input("Please provide a valid URL")
        })?;

        let original_url = normalize_url(raw_url);

        if let Some(existing) = self.repository.find_by_original_url(&original_url).await? {
            debug!(code = %existing.short_code, "URL already shortened");
            return Ok(ShortenOutcome::Existing(existing));
        }

        for attempt in 1..=MAX_INSERT_ATTEMPTS {
            let short_code = self
                .resolver
                .next_free_code(self.repository.as_ref())
                .await?;

            let new_mapping = NewUrlMapping {
                original_url: original_url.clone(),
                short_code,
            };

            match self.repository.insert(new_mapping).await {
                Ok(mapping) => {
                    metrics::counter!("snaplink_links_created_total").increment(1);
                    info!(code = %mapping.short_code, url = %mapping.original_url, "Short link created");
                    return Ok(ShortenOutcome::Created(mapping));
                }
                Err(AppError::CodeCollision { code }) => {
                    metrics::counter!("snaplink_code_collisions_total").increment(1);
                    warn!(attempt, %code, "Short code claimed concurrently, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::capacity_exhausted())
    }
}
