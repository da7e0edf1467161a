//! Handler for slug redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a slug to its target URL.
///
/// # Endpoint
///
/// `GET /{slug}`
///
/// # Click Tracking
///
/// The click counter is incremented on a detached task. The redirect is sent
/// without waiting for it and increment failures are only logged.
///
/// # Errors
///
/// Returns 400 Bad Request if the slug is the bare sentinel or unknown.
/// Returns 500 Internal Server Error if the store cannot be read.
pub async fn redirect_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let resolved = state.registry.resolve(&slug).await?;

    // Detach; the increment finishes on its own.
    drop(resolved.click_task);

    Ok(Redirect::temporary(&resolved.target_url))
}
