//! Cache service trait and error types.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for caching short code to target URL mappings.
///
/// Implementations must be thread-safe and fail open: cache failures degrade
/// to store lookups and never fail a request.
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the target URL for a short code.
    ///
    /// Returns `Ok(None)` on cache miss or backend error.
    async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>>;

    /// Stores a mapping with an optional TTL (implementation default if `None`).
    async fn set_url(
        &self,
        short_code: &str,
        target_url: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
