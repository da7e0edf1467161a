//! Infrastructure layer for external integrations.
//!
//! Implements the storage interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - Redis and in-memory redirect repositories

pub mod persistence;
