//! Repository trait definitions for the domain layer.
//!
//! Traits define the storage contract; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`RedirectRepository`] - Redirect record storage

pub mod redirect_repository;

pub use redirect_repository::{RedirectRepository, StoreError};

#[cfg(test)]
pub use redirect_repository::MockRedirectRepository;
