//! Utility functions for identifier generation and input validation.
//!
//! - [`code_generator`] - Slug and admin key generation
//! - [`url_validator`] - Redirect target validation

pub mod code_generator;
pub mod url_validator;
