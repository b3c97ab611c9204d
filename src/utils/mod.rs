//! Utility functions shared across layers.
//!
//! - [`code_generator`] - Short code generation and format validation
//! - [`db_error`] - Classification of sqlx errors into store errors

pub mod code_generator;
pub mod db_error;
