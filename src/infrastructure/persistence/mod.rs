//! Redirect repository implementations.
//!
//! # Repositories
//!
//! - [`RedisRedirectRepository`] - Production storage, one Redis list per slug
//! - [`MemoryRedirectRepository`] - In-process storage for tests
//!
//! Both share the list layout defined in [`record_codec`].

pub mod memory_redirect_repository;
pub mod record_codec;
pub mod redis_redirect_repository;

pub use memory_redirect_repository::MemoryRedirectRepository;
pub use redis_redirect_repository::RedisRedirectRepository;
