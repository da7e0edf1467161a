//! DTOs for redirect creation and management endpoints.

use serde::{Deserialize, Serialize};

use crate::application::services::CreatedRedirect;

/// Query string of `POST /new`.
#[derive(Debug, Deserialize)]
pub struct CreateQuery {
    /// Redirect target, a bare `http(s)://host.tld`.
    pub url: Option<String>,
}

/// Response of `POST /new`.
///
/// The only place the admin key is ever returned.
#[derive(Debug, Serialize)]
pub struct CreateResponse {
    pub slug: String,
    pub key: String,
}

impl From<CreatedRedirect> for CreateResponse {
    fn from(created: CreatedRedirect) -> Self {
        Self {
            slug: created.slug,
            key: created.key,
        }
    }
}

/// Query string carrying the admin key for stats and delete.
#[derive(Debug, Deserialize)]
pub struct KeyQuery {
    pub key: Option<String>,
}
