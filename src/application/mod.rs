//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::registry_service::RedirectRegistry`] - Slug lifecycle and admin key checks

pub mod services;
