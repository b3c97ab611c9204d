//! DTOs for the link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a single URL.
///
/// The target is opaque: any non-empty string is accepted.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(length(min = 1, message = "target_url must not be empty"))]
    pub target_url: String,
}

/// Response carrying the resolvable short URL.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_url: String,
}
