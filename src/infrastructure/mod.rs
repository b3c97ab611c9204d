//! Infrastructure layer for external integrations.
//!
//! # Modules
//!
//! - [`cache`] - Redirect cache (Redis and no-op implementations)
//! - [`persistence`] - Store adapters (PostgreSQL and in-memory)

pub mod cache;
pub mod persistence;
