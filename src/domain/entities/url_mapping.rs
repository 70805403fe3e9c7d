//! UrlMapping entity: a short code bound to an original URL.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A persisted short code → original URL mapping.
///
/// Once created, only `click_count` (and with it `updated_at`) ever changes.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UrlMapping {
    pub id: Uuid,
    pub original_url: String,
    pub short_code: String,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UrlMapping {
    /// Creates a mapping as it looks right after insertion.
    pub fn new(id: Uuid, original_url: String, short_code: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            original_url,
            short_code,
            click_count: 0,
            created_at,
            updated_at: created_at,
        }
    }

    /// Composes the public short URL, `base_url/short_code`.
    pub fn short_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.short_code)
    }
}

/// Input data for inserting a new mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlMapping {
    pub original_url: String,
    pub short_code: String,
}
