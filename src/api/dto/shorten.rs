//! Request DTO for the shortening endpoint.

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::utils::url_normalizer::validate_url;

/// Request to shorten a single URL.
///
/// A missing `url` field deserializes to an empty string so that it is
/// reported by validation ("URL is required") instead of as a JSON error.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The URL to shorten. A scheme is optional; `https://` is assumed.
    #[serde(default)]
    #[validate(
        length(min = 1, message = "URL is required"),
        custom(function = "validate_url_field", message = "Please provide a valid URL")
    )]
    pub url: String,
}

fn validate_url_field(url: &str) -> Result<(), ValidationError> {
    validate_url(url).map_err(|_| ValidationError::new("url"))
}
