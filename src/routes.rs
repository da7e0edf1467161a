//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET    /`               - Version banner
//! - `GET    /health`         - Store health check
//! - `POST   /new`            - Register a redirect (`?url=`)
//! - `GET    /clicks/{slug}`  - Click counter (`?key=`)
//! - `GET    /{slug}`         - Redirect
//! - `DELETE /{slug}`         - Delete a redirect (`?key=`)
//!
//! Generated slugs start with `!`, so they never shadow the fixed routes.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::{
    clicks_handler, create_handler, delete_handler, health_handler, index_handler,
    redirect_handler,
};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// All routes with state and tracing applied.
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/new", post(create_handler))
        .route("/clicks/{slug}", get(clicks_handler))
        .route("/{slug}", get(redirect_handler).delete(delete_handler))
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(routes(state))
}
