//! Domain layer containing the short link entity and the store contract.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Store trait definitions implemented by the infrastructure layer
//!
//! The domain layer has no dependencies on infrastructure or presentation layers.
//! Allocation logic lives in [`crate::application::services`].

pub mod entities;
pub mod repositories;
