//! Collision-checked short code allocation.

use crate::domain::repositories::MappingRepository;
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, is_reserved};
use tracing::debug;

/// Default number of candidates tried before giving up.
pub const MAX_ATTEMPTS: usize = 10;

/// Draws candidate codes until one is not yet assigned.
///
/// The existence check is a plain lookup, not a lock: two requests can still
/// pick the same free code. The store's unique index catches that case on
/// insert (see [`crate::application::services::ShortenerService`]).
pub struct UniquenessResolver<G: CodeGenerator> {
    generator: G,
    max_attempts: usize,
}

impl<G: CodeGenerator> UniquenessResolver<G> {
    /// Creates a resolver with the default [`MAX_ATTEMPTS`] bound.
    pub fn new(generator: G) -> Self {
        Self::with_max_attempts(generator, MAX_ATTEMPTS)
    }

    pub fn with_max_attempts(generator: G, max_attempts: usize) -> Self {
        Self {
            generator,
            max_attempts,
        }
    }

    /// Returns the first generated code that the repository does not know.
    ///
    /// Reserved route segments count as collisions.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CapacityExhausted`] when every attempt collided.
    /// Propagates repository errors unchanged.
    pub async fn next_free_code<R>(&self, repository: &R) -> Result<String, AppError>
    where
        R: MappingRepository + ?Sized,
    {
        for attempt in 1..=self.max_attempts {
            let candidate = self.generator.generate();

            if is_reserved(&candidate) {
                debug!(attempt, code = %candidate, "Skipping reserved short code");
                continue;
            }

            if repository.find_by_short_code(&candidate).await?.is_none() {
                return Ok(candidate);
            }

            metrics::counter!("snaplink_code_collisions_total").increment(1);
            debug!(attempt, code = %candidate, "Short code collision");
        }

        Err(AppError::capacity_exhausted())
    }
}
