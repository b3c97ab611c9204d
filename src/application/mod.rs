//! Application layer services implementing the allocation logic.
//!
//! Services consume store traits and provide a clean API for HTTP handlers
//! and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::resolver::Resolver`] - Idempotent lookup of an existing mapping
//! - [`services::allocator::Allocator`] - Code generation with collision retry
//! - [`services::link_service::LinkService`] - Resolve-or-allocate entry point

pub mod services;
