//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::shorten::ShortenRequest;
use crate::api::dto::url_mapping::UrlMappingResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Creates (or returns the existing) short link for a URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "example.com/very-long-url" }
/// ```
///
/// # Response
///
/// - **201 Created** with the new mapping
/// - **200 OK** with the existing mapping if the normalized URL was already shortened
///
/// # Errors
///
/// Returns 400 Bad Request if the body is not JSON or the URL is invalid.
/// Returns 409 Conflict if no free short code could be allocated.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UrlMappingResponse>), AppError> {
    let Json(payload) = payload.map_err(|rejection| AppError::invalid_input(rejection.body_text()))?;
    payload.validate()?;

    let outcome = state.shortener_service.shorten(&payload.url).await?;

    let status = if outcome.is_created() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(UrlMappingResponse::from_mapping(
            outcome.into_mapping(),
            &state.base_url,
        )),
    ))
}
