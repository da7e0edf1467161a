//! Handler for redirect creation endpoint.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::dto::shorten::{CreateQuery, CreateResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new redirect and returns its slug and admin key.
///
/// # Endpoint
///
/// `POST /new?url=https://example.com`
///
/// # Response
///
/// ```json
/// {
///   "slug": "!aB3x9",
///   "key": "<64 alphanumeric characters>"
/// }
/// ```
///
/// The key is shown only once; it is required for `/clicks/{slug}` and
/// `DELETE /{slug}`.
///
/// # Errors
///
/// Returns 400 Bad Request if `url` is missing or not a bare `http(s)://host.tld`.
/// Returns 500 Internal Server Error if identifiers cannot be generated or stored.
pub async fn create_handler(
    State(state): State<AppState>,
    Query(query): Query<CreateQuery>,
) -> Result<Json<CreateResponse>, AppError> {
    let created = state.registry.create(query.url.as_deref()).await?;

    Ok(Json(created.into()))
}
