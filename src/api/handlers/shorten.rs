//! Handler for link shortening endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the short URL for a target URL, allocating a code on first use.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "target_url": "https://example.com/a" }
/// ```
///
/// # Response
///
/// ```json
/// { "short_url": "https://s.example.com/r/aB3xY9" }
/// ```
///
/// Repeating the request with the same target returns the same short URL.
///
/// # Errors
///
/// - **400** `invalid_input` - body missing, `target_url` absent, not a string, or empty
/// - **503** `store_unavailable` - record store failure
/// - **500** `exhausted_retries` - no free code found within the attempt bound
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let link = state
        .link_service
        .get_or_create_short_link(&payload.target_url)
        .await?;

    Ok(Json(ShortenResponse {
        short_url: state.link_service.short_url(&link.code),
    }))
}
