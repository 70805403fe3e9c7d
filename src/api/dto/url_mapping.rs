//! Response DTO shared by the shorten and stats endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::UrlMapping;

/// Public view of a mapping.
///
/// ```json
/// {
///   "id": "2f6c1e9a-5b8d-4a0e-9c7f-1d2e3f4a5b6c",
///   "originalUrl": "https://example.com/a",
///   "shortCode": "Ab3dE9",
///   "shortUrl": "http://localhost:3001/Ab3dE9",
///   "clickCount": 0,
///   "createdAt": "2025-01-01T12:00:00Z"
/// }
/// ```
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlMappingResponse {
    pub id: Uuid,
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
}

impl UrlMappingResponse {
    pub fn from_mapping(mapping: UrlMapping, base_url: &str) -> Self {
        Self {
            short_url: mapping.short_url(base_url),
            id: mapping.id,
            original_url: mapping.original_url,
            short_code: mapping.short_code,
            click_count: mapping.click_count,
            created_at: mapping.created_at,
        }
    }
}
