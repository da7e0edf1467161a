//! Best-effort click counting.
//!
//! A resolve spawns one increment task and returns without waiting for it.
//! The task may outlive the request, has no ordering guarantee relative to
//! other resolves, and reports failures only through the log.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domain::repositories::RedirectRepository;

/// Spawns a detached task that increments the click counter for `slug`.
///
/// The returned handle may be dropped; it exists so callers (and tests) can
/// observe completion when they care to.
pub fn spawn_click_increment(
    repository: Arc<dyn RedirectRepository>,
    slug: String,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        match repository.increment_clicks(&slug).await {
            Ok(Some(clicks)) => debug!(slug = %slug, clicks, "Click recorded"),
            Ok(None) => debug!(slug = %slug, "Record removed before click was recorded"),
            Err(e) => warn!(slug = %slug, error = %e, "Failed to increment click counter"),
        }
    })
}
