//! Repository trait for redirect record storage.

use crate::domain::entities::{NewRedirect, Redirect};
use async_trait::async_trait;

/// Errors raised by a redirect store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend could not be reached or rejected the command.
    #[error("store backend error: {0}")]
    Backend(String),

    /// A stored value did not have the expected shape.
    #[error("corrupt record for {slug}: {reason}")]
    Corrupt { slug: String, reason: String },
}

/// Storage interface for redirect records.
///
/// Every method is a single store round trip. Implementations must be safe to
/// share across tasks.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::RedisRedirectRepository`] - Redis list per slug
/// - [`crate::infrastructure::persistence::MemoryRedirectRepository`] - In-process map for tests
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RedirectRepository: Send + Sync {
    /// Stores a new record unless the slug is already taken.
    ///
    /// Returns `Ok(false)` when a record already exists; the existing record is untouched.
    async fn insert_if_absent(&self, new_redirect: NewRedirect) -> Result<bool, StoreError>;

    /// Loads the record stored under `slug`.
    ///
    /// Records with an empty target are reported as absent.
    async fn find(&self, slug: &str) -> Result<Option<Redirect>, StoreError>;

    /// Adds one to the click counter and returns the new value.
    ///
    /// Returns `Ok(None)` if the record does not exist; it is never recreated.
    async fn increment_clicks(&self, slug: &str) -> Result<Option<u64>, StoreError>;

    /// Removes the record. Returns `Ok(true)` if something was deleted.
    async fn delete(&self, slug: &str) -> Result<bool, StoreError>;

    /// Checks if the store answers.
    async fn health_check(&self) -> bool;
}
