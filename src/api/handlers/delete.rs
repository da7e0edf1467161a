//! Handler for redirect deletion.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::api::dto::shorten::KeyQuery;
use crate::error::AppError;
use crate::state::AppState;

/// Deletes a redirect after checking its admin key.
///
/// # Endpoint
///
/// `DELETE /{slug}?key=<admin key>`
///
/// # Errors
///
/// Returns 400 Bad Request if the slug or key is missing, or the slug is unknown.
/// Returns 401 Unauthorized if the key does not match.
/// Returns 500 Internal Server Error if the record cannot be read or removed.
pub async fn delete_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
    Query(query): Query<KeyQuery>,
) -> Result<StatusCode, AppError> {
    state.registry.delete(&slug, query.key.as_deref()).await?;

    Ok(StatusCode::OK)
}
