//! DTO for the service banner.

use serde::Serialize;

/// Response of `GET /`.
///
/// Serialized as `{"bang!": "<version>"}`.
#[derive(Debug, Serialize)]
pub struct VersionResponse {
    #[serde(rename = "bang!")]
    pub version: String,
}

impl VersionResponse {
    /// Banner carrying the crate version.
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
