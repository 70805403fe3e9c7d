//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`              - Front-end page
//! - `GET  /{short_code}`  - Short link redirect
//! - `GET  /health`        - Health check: DB, click queue
//! - `/api/*`              - JSON API
//! - `/static/*`           - Static assets
//!
//! Static routes take precedence over the `/{short_code}` capture, which is
//! why `health`, `api` and `static` are never issued as codes.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use std::path::Path;

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::{ServeDir, ServeFile};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `static_dir` - directory holding `index.html` and the front-end assets
pub fn app_router(state: AppState, static_dir: impl AsRef<Path>) -> NormalizePath<Router> {
    let static_dir = static_dir.as_ref();

    let router = Router::new()
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .route("/health", get(health_handler))
        .route("/{short_code}", get(redirect_handler))
        .nest("/api", api::routes::api_routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
