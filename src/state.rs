//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{RedirectService, ShortenerService};
use crate::infrastructure::persistence::PgMappingRepository;
use crate::utils::code_generator::RandomCodeGenerator;

pub type PgShortenerService = ShortenerService<PgMappingRepository, RandomCodeGenerator>;
pub type PgRedirectService = RedirectService<PgMappingRepository>;

/// Cloneable handle to the services. Cheap to clone (all `Arc`s).
#[derive(Clone)]
pub struct AppState {
    pub shortener_service: Arc<PgShortenerService>,
    pub redirect_service: Arc<PgRedirectService>,
    /// Public origin for composed short URLs, without trailing slash.
    pub base_url: Arc<str>,
}

impl AppState {
    pub fn new(
        shortener_service: Arc<PgShortenerService>,
        redirect_service: Arc<PgRedirectService>,
        base_url: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            shortener_service,
            redirect_service,
            base_url: base_url.into(),
        }
    }
}
