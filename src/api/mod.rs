//! HTTP API layer.
//!
//! Translates HTTP requests into registry operations and formats responses.
//!
//! # Modules
//!
//! - [`dto`] - Query and response types
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing

pub mod dto;
pub mod handlers;
pub mod middleware;
