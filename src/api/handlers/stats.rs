//! Handler for link statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::url_mapping::UrlMappingResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns a mapping with its current click count.
///
/// # Endpoint
///
/// `GET /api/stats/{short_code}`
///
/// Reading stats never counts as a click.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(short_code): Path<String>,
) -> Result<Json<UrlMappingResponse>, AppError> {
    let mapping = state.redirect_service.stats(&short_code).await?;

    Ok(Json(UrlMappingResponse::from_mapping(
        mapping,
        &state.base_url,
    )))
}
