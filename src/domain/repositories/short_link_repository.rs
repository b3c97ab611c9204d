//! Store trait for short link records.

use crate::domain::entities::{NewShortLink, ShortLink};
use async_trait::async_trait;
use thiserror::Error;

/// Errors reported by store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The insert was rejected because the code is already taken.
    ///
    /// Transient from the allocator's point of view: it regenerates and retries.
    #[error("short code already exists: {0}")]
    UniqueViolation(String),

    /// Transport or backend failure. Never retried by the link services.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Durable record store for short links.
///
/// # Required capability
///
/// [`insert`](Self::insert) must be an atomic conditional insert: it either
/// commits the record or fails with [`StoreError::UniqueViolation`] when the
/// code already exists, and two concurrent inserts of the same code can never
/// both succeed. The allocator never checks for existence before inserting, so
/// this primitive is the only arbiter of code uniqueness.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryShortLinkRepository`] - DashMap implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortLinkRepository: Send + Sync {
    /// Atomically inserts a new mapping.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UniqueViolation`] if the code is already taken,
    /// [`StoreError::Unavailable`] on any other failure. Nothing is persisted
    /// on error.
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, StoreError>;

    /// Finds a link by exact target URL equality.
    ///
    /// Target URLs are not unique; when several records match, the earliest
    /// committed one is returned.
    async fn find_by_target_url(&self, target_url: &str)
    -> Result<Option<ShortLink>, StoreError>;

    /// Finds a link by its short code.
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, StoreError>;

    /// Counts committed links.
    async fn count(&self) -> Result<i64, StoreError>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
