//! Domain layer containing business entities and storage contracts.
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Storage trait definitions
//! - [`click_counter`] - Detached click counter increments
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Business rules live in [`crate::application::services`].

pub mod click_counter;
pub mod entities;
pub mod repositories;
