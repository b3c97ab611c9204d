//! Store trait definitions for the domain layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Testing
//!
//! See integration tests in `tests/repository_short_link.rs` for usage examples.

pub mod short_link_repository;

pub use short_link_repository::{ShortLinkRepository, StoreError};

#[cfg(test)]
pub use short_link_repository::MockShortLinkRepository;
