//! Handler for short link redirects.

use axum::{
    extract::{Path, State},
    http::HeaderValue,
    response::Redirect,
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its target URL.
///
/// # Endpoint
///
/// `GET /r/{code}`
///
/// # Flow
///
/// 1. Check cache for the code
/// 2. On miss, look the code up in the store
/// 3. Populate the cache and redirect
///
/// Mappings never change once committed, so a cached target is always current.
///
/// # Response Codes
///
/// - **307 Temporary Redirect**: code found
/// - **404 Not Found**: unknown or malformed code
/// - **422 Unprocessable Entity**: target cannot be used as a `Location` header
/// - **503 Service Unavailable**: store failure
pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Redirect, AppError> {
    if let Ok(Some(url)) = state.cache.get_url(&code).await {
        return redirect_to(&code, &url);
    }

    let link = state.link_service.find_by_code(&code).await?;
    let redirect = redirect_to(&link.code, &link.target_url)?;

    if let Err(e) = state.cache.set_url(&link.code, &link.target_url, None).await {
        tracing::warn!(code = %link.code, error = %e, "Failed to cache short link");
    }

    Ok(redirect)
}

/// Targets are stored as opaque strings and may hold bytes a header value
/// cannot carry (control characters such as `\n`).
fn redirect_to(code: &str, target_url: &str) -> Result<Redirect, AppError> {
    if HeaderValue::from_str(target_url).is_err() {
        tracing::warn!(code = %code, "Stored target is not a valid Location header");
        return Err(AppError::invalid_target(
            "Short link target cannot be used as a redirect location",
            json!({ "code": code }),
        ));
    }

    Ok(Redirect::temporary(target_url))
}
