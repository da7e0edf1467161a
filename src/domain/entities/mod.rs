//! Core domain entities.
//!
//! - [`Redirect`] - A stored slug → target mapping with its admin key and counter
//! - [`NewRedirect`] - Input for registering a redirect

pub mod redirect;

pub use redirect::{NewRedirect, Redirect};
