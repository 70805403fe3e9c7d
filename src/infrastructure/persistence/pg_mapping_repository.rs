//! PostgreSQL implementation of the mapping repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;

/// Unique constraint guarding `url_mappings.short_code`.
pub const SHORT_CODE_CONSTRAINT: &str = "url_mappings_short_code_key";

/// PostgreSQL repository for URL mappings.
///
/// Short code uniqueness is enforced by the `url_mappings_short_code_key`
/// constraint; click counting is a single `UPDATE ... SET click_count =
/// click_count + 1` so concurrent redirects never lose an update.
pub struct PgMappingRepository {
    pool: Arc<PgPool>,
}

impl PgMappingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MappingRepository for PgMappingRepository {
    async fn find_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<UrlMapping>, AppError> {
        let mapping = sqlx::query_as::<_, UrlMapping>(
            r#"
            SELECT id, original_url, short_code, click_count, created_at, updated_at
            FROM url_mappings
            WHERE original_url = $1
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .bind(original_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(mapping)
    }

    async fn find_by_short_code(&self, short_code: &str) -> Result<Option<UrlMapping>, AppError> {
        let mapping = sqlx::query_as::<_, UrlMapping>(
            r#"
            SELECT id, original_url, short_code, click_count, created_at, updated_at
            FROM url_mappings
            WHERE short_code = $1
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(mapping)
    }

    async fn insert(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError> {
        let result = sqlx::query_as::<_, UrlMapping>(
            r#"
            INSERT INTO url_mappings (id, original_url, short_code)
            VALUES ($1, $2, $3)
            RETURNING id, original_url, short_code, click_count, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new_mapping.original_url)
        .bind(&new_mapping.short_code)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(mapping) => Ok(mapping),
            Err(e) if is_short_code_conflict(&e) => Err(AppError::CodeCollision {
                code: new_mapping.short_code,
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn increment_click_count(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE url_mappings
            SET click_count = click_count + 1, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}

fn is_short_code_conflict(e: &sqlx::Error) -> bool {
    e.as_database_error().is_some_and(|db_err| {
        db_err.is_unique_violation() && db_err.constraint() == Some(SHORT_CODE_CONSTRAINT)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_are_not_conflicts() {
        assert!(!is_short_code_conflict(&sqlx::Error::RowNotFound));
        assert!(!is_short_code_conflict(&sqlx::Error::PoolTimedOut));
    }
}
