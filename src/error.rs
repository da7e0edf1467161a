//! Error types for the registry and their HTTP representation.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::repositories::StoreError;
use crate::utils::code_generator::RandomSourceError;

/// Failures of the redirect registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("missing url query parameter")]
    MissingParameter,

    #[error("invalid url, please add http:// or https://")]
    InvalidUrl,

    #[error("missing slug")]
    MissingSlug,

    #[error("missing key from query params")]
    MissingKey,

    #[error("admin key does not match")]
    Unauthorized,

    #[error("redirect not found")]
    NotFound,

    #[error("failed to generate identifier: {0}")]
    GenerationFailure(String),

    #[error("failed to register redirect: {0}")]
    PersistenceFailure(#[source] StoreError),

    #[error("failed to retrieve redirect: {0}")]
    LookupFailure(#[source] StoreError),

    #[error("failed to delete redirect: {0}")]
    DeletionFailure(#[source] StoreError),
}

impl From<RandomSourceError> for RegistryError {
    fn from(e: RandomSourceError) -> Self {
        Self::GenerationFailure(e.to_string())
    }
}

/// JSON error envelope returned by every failing endpoint.
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error code, human message and optional details.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    Unauthorized { message: String, details: Value },
    NotFound { message: String, details: Value },
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Returns the HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            // Unknown slugs are a client fault, not a 404, for compatibility with existing clients.
            AppError::Validation { .. } | AppError::NotFound { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into its serializable form.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::Unauthorized { message, details } => ("unauthorized", message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::Internal { message, details } => ("internal_error", message, details),
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let info = self.to_error_info();
        write!(f, "{}: {}", info.code, info.message)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<RegistryError> for AppError {
    fn from(e: RegistryError) -> Self {
        let message = e.to_string();
        match e {
            RegistryError::MissingParameter => {
                AppError::bad_request(message, json!({ "parameter": "url" }))
            }
            RegistryError::InvalidUrl => AppError::bad_request(message, json!({})),
            RegistryError::MissingSlug => AppError::bad_request(message, json!({})),
            RegistryError::MissingKey => {
                AppError::bad_request(message, json!({ "parameter": "key" }))
            }
            RegistryError::Unauthorized => AppError::unauthorized("Unauthorized", json!({})),
            RegistryError::NotFound => AppError::not_found(message, json!({})),
            RegistryError::GenerationFailure(_)
            | RegistryError::PersistenceFailure(_)
            | RegistryError::LookupFailure(_)
            | RegistryError::DeletionFailure(_) => {
                tracing::error!(error = %e, "Registry operation failed");
                // Store internals stay in the log.
                let public = match e {
                    RegistryError::GenerationFailure(_) => "failed to generate identifier",
                    RegistryError::PersistenceFailure(_) => "failed to register redirect",
                    RegistryError::LookupFailure(_) => "failed to retrieve redirect",
                    _ => "failed to delete redirect",
                };
                AppError::internal(public, json!({}))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_bad_request() {
        for e in [
            RegistryError::MissingParameter,
            RegistryError::InvalidUrl,
            RegistryError::MissingSlug,
            RegistryError::MissingKey,
            RegistryError::NotFound,
        ] {
            assert_eq!(AppError::from(e).status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_unauthorized_maps_to_401() {
        let err = AppError::from(RegistryError::Unauthorized);
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.to_error_info().code, "unauthorized");
    }

    #[test]
    fn test_store_failures_are_internal_and_hide_details() {
        let err = AppError::from(RegistryError::LookupFailure(StoreError::Backend(
            "connection refused to 10.0.0.5".to_string(),
        )));

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let info = err.to_error_info();
        assert_eq!(info.code, "internal_error");
        assert!(!info.message.contains("10.0.0.5"));
    }

    #[test]
    fn test_generation_failure_is_internal() {
        let err = AppError::from(RegistryError::GenerationFailure("exhausted".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_not_found_keeps_its_code() {
        let info = AppError::from(RegistryError::NotFound).to_error_info();
        assert_eq!(info.code, "not_found");
        assert_eq!(info.message, "redirect not found");
    }
}
