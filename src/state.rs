//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::RedirectRegistry;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<RedirectRegistry>,
}

impl AppState {
    pub fn new(registry: Arc<RedirectRegistry>) -> Self {
        Self { registry }
    }
}
