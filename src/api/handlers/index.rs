//! Handler for the service banner.

use axum::Json;

use crate::api::dto::version::VersionResponse;

/// Returns the running version.
///
/// # Endpoint
///
/// `GET /`
///
/// # Response
///
/// ```json
/// { "bang!": "1.1.0" }
/// ```
pub async fn index_handler() -> Json<VersionResponse> {
    Json(VersionResponse::current())
}
