//! Resolve-or-allocate entry point for short links.

use std::sync::Arc;

use serde_json::json;

use crate::application::services::{Allocator, Resolver};
use crate::domain::entities::ShortLink;
use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, is_valid_code};

/// Service for issuing and looking up short links.
///
/// Holds no mutable state of its own: every coordination point is the store's
/// atomic insert, so one instance is shared freely across requests.
///
/// # Idempotency
///
/// The resolver runs first and its hit is returned as is. Two concurrent
/// first-time requests for the same URL may both miss and commit different
/// codes; afterwards the resolver consistently returns the earliest one.
pub struct LinkService<R: ShortLinkRepository + ?Sized> {
    repository: Arc<R>,
    resolver: Resolver<R>,
    allocator: Allocator<R>,
    base_url: String,
}

impl<R: ShortLinkRepository + ?Sized> LinkService<R> {
    /// Creates a link service drawing uniform random codes.
    ///
    /// `base_url` is the public origin short URLs are built on
    /// (`BASE_URL`, e.g. `https://s.example.com`).
    pub fn new(repository: Arc<R>, base_url: impl Into<String>) -> Self {
        Self {
            resolver: Resolver::new(repository.clone()),
            allocator: Allocator::new(repository.clone()),
            repository,
            base_url: base_url.into(),
        }
    }

    /// Creates a link service with a custom code source.
    pub fn with_generator(
        repository: Arc<R>,
        generator: Arc<dyn CodeGenerator>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            resolver: Resolver::new(repository.clone()),
            allocator: Allocator::with_generator(repository.clone(), generator),
            repository,
            base_url: base_url.into(),
        }
    }

    /// Returns the short link for `target_url`, allocating one on first use.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidInput`] if `target_url` is empty
    /// - [`AppError::StoreUnavailable`] on store failure
    /// - [`AppError::ExhaustedRetries`] if no free code was found
    pub async fn get_or_create_short_link(&self, target_url: &str) -> Result<ShortLink, AppError> {
        if target_url.is_empty() {
            return Err(AppError::invalid_input(
                "target_url must be a non-empty string",
                json!({ "field": "target_url" }),
            ));
        }

        if let Some(existing) = self.resolver.resolve(target_url).await? {
            return Ok(existing);
        }

        self.allocator.allocate(target_url).await
    }

    /// Looks up the link a short code points to.
    ///
    /// Strings that cannot be generated codes are rejected without a store
    /// round trip.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown codes and
    /// [`AppError::StoreUnavailable`] on store failure.
    pub async fn find_by_code(&self, code: &str) -> Result<ShortLink, AppError> {
        let not_found = || AppError::not_found("Short link not found", json!({ "code": code }));

        if !is_valid_code(code) {
            return Err(not_found());
        }

        self.repository
            .find_by_code(code)
            .await?
            .ok_or_else(not_found)
    }

    /// Builds the public short URL for a code: `<base_url>/r/<code>`.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/r/{}", self.base_url.trim_end_matches('/'), code)
    }

    /// Counts issued links.
    pub async fn count(&self) -> Result<i64, AppError> {
        Ok(self.repository.count().await?)
    }

    /// Checks store connectivity.
    pub async fn ping(&self) -> Result<(), AppError> {
        Ok(self.repository.ping().await?)
    }
}
