//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde; query strings are decoded into the `*Query` types and
//! JSON bodies are produced from the `*Response` types.

pub mod health;
pub mod shorten;
pub mod version;
