//! Click event passed from the redirect path to the click worker.

use uuid::Uuid;

/// A successful redirect that still has to be counted.
///
/// Carries the mapping id (the increment key) and the short code for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub mapping_id: Uuid,
    pub short_code: String,
}

impl ClickEvent {
    pub fn new(mapping_id: Uuid, short_code: impl Into<String>) -> Self {
        Self {
            mapping_id,
            short_code: short_code.into(),
        }
    }
}
