//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{short_code}`
///
/// # Response
///
/// `301 Moved Permanently` with the original URL in `Location`, non-ASCII
/// characters percent-encoded. The click is counted asynchronously after the
/// response is produced.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let original_url = state.redirect_service.resolve(&short_code).await?;

    let location = HeaderValue::try_from(original_url.as_str()).map_err(|_| {
        AppError::internal(format!(
            "Stored URL for '{short_code}' is not a valid Location header"
        ))
    })?;

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]))
}
