//! HTTP request handlers for API endpoints.
//!
//! Handlers only translate HTTP into registry calls; all rules live in
//! [`crate::application::services::RedirectRegistry`].

pub mod clicks;
pub mod delete;
pub mod health;
pub mod index;
pub mod redirect;
pub mod shorten;

pub use clicks::clicks_handler;
pub use delete::delete_handler;
pub use health::health_handler;
pub use index::index_handler;
pub use redirect::redirect_handler;
pub use shorten::create_handler;
