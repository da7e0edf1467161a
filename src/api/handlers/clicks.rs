//! Handler for click statistics.

use axum::extract::{Path, Query, State};

use crate::api::dto::shorten::KeyQuery;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the click counter of a slug as plain text.
///
/// # Endpoint
///
/// `GET /clicks/{slug}?key=<admin key>`
///
/// # Errors
///
/// Returns 400 Bad Request if the slug or key is missing.
/// Returns 401 Unauthorized if the key does not match (or the slug is unknown).
/// Returns 500 Internal Server Error if the store cannot be read.
pub async fn clicks_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
    Query(query): Query<KeyQuery>,
) -> Result<String, AppError> {
    let clicks = state.registry.stats(&slug, query.key.as_deref()).await?;

    Ok(clicks)
}
