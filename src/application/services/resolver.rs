//! Lookup of previously issued short links.

use std::sync::Arc;

use tracing::debug;

use crate::domain::entities::ShortLink;
use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;

/// Finds the short link already issued for a target URL.
///
/// A single point lookup keyed by exact URL equality, with no side effects.
pub struct Resolver<R: ShortLinkRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: ShortLinkRepository + ?Sized> Resolver<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns the existing link for `target_url`, or `None` if none was issued.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on any store error. The lookup is
    /// not retried.
    pub async fn resolve(&self, target_url: &str) -> Result<Option<ShortLink>, AppError> {
        let link = self.repository.find_by_target_url(target_url).await?;

        if let Some(ref link) = link {
            metrics::counter!("shortlink_resolver_hits_total").increment(1);
            debug!(code = %link.code, "Resolved existing short link");
        }

        Ok(link)
    }
}
