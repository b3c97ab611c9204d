//! Core domain entities.
//!
//! - [`ShortLink`] - A committed short code to target URL mapping
//! - [`NewShortLink`] - Insert payload for a candidate mapping

pub mod short_link;

pub use short_link::{NewShortLink, ShortLink};
