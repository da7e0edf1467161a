//! # bang-shortener
//!
//! A tiny URL shortener built with Axum and Redis. Every redirect gets a
//! `!`-prefixed slug and a 64-character admin key; the key is the only
//! credential for reading the click counter or deleting the redirect.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Redirect entity, repository trait, click counting
//! - **Application Layer** ([`application`]) - The redirect registry
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis and in-memory repositories
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs, and middleware
//!
//! ## Quick Start
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379"
//! cargo run
//!
//! curl -X POST 'http://localhost:8080/new?url=https://example.com'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::{AppError, RegistryError};
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{CreatedRedirect, RedirectRegistry, Resolved};
    pub use crate::domain::entities::{NewRedirect, Redirect};
    pub use crate::domain::repositories::{RedirectRepository, StoreError};
    pub use crate::error::{AppError, RegistryError};
    pub use crate::infrastructure::persistence::{
        MemoryRedirectRepository, RedisRedirectRepository,
    };
    pub use crate::state::AppState;
}
