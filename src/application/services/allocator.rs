//! Allocation of new short codes with store-arbitrated uniqueness.

use std::sync::Arc;

use serde_json::json;
use tracing::{error, info, warn};

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::{ShortLinkRepository, StoreError};
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, RandomCodeGenerator};

/// Upper bound on insert attempts per allocation.
///
/// Hitting it means the code space is nearly exhausted or the store is
/// misbehaving; it is a circuit breaker, not a normal-path expectation.
pub const MAX_ALLOCATION_ATTEMPTS: usize = 5;

/// Allocates a new short code for a target URL.
///
/// # Algorithm
///
/// 1. Draw a candidate code from the [`CodeGenerator`]
/// 2. Attempt an atomic conditional insert of `(code, target_url)`
/// 3. On success, return the committed link
/// 4. On a unique violation, draw a fresh code (never resubmitting a rejected one)
/// 5. After [`MAX_ALLOCATION_ATTEMPTS`] draws, fail with [`AppError::ExhaustedRetries`]
///
/// A draw that repeats a code rejected earlier in the call is not submitted but
/// still uses up an attempt, so a degenerate generator cannot extend the loop.
///
/// Any other store error ends the call with [`AppError::StoreUnavailable`].
/// There is no existence pre-check: the store's insert is the only arbiter of
/// uniqueness, so concurrent allocators never race on a check-then-act window.
pub struct Allocator<R: ShortLinkRepository + ?Sized> {
    repository: Arc<R>,
    generator: Arc<dyn CodeGenerator>,
}

impl<R: ShortLinkRepository + ?Sized> Allocator<R> {
    /// Creates an allocator drawing uniform random codes.
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_generator(repository, Arc::new(RandomCodeGenerator))
    }

    /// Creates an allocator with a custom code source.
    pub fn with_generator(repository: Arc<R>, generator: Arc<dyn CodeGenerator>) -> Self {
        Self {
            repository,
            generator,
        }
    }

    /// Commits a new short link for `target_url`.
    ///
    /// Meant to run after a resolver miss; it does not look for an existing
    /// mapping itself.
    ///
    /// # Errors
    ///
    /// - [`AppError::ExhaustedRetries`] after [`MAX_ALLOCATION_ATTEMPTS`] attempts without a commit
    /// - [`AppError::StoreUnavailable`] on the first non-collision store error
    pub async fn allocate(&self, target_url: &str) -> Result<ShortLink, AppError> {
        let mut rejected: Vec<String> = Vec::with_capacity(MAX_ALLOCATION_ATTEMPTS);

        for attempt in 1..=MAX_ALLOCATION_ATTEMPTS {
            let code = self.generator.generate();

            if rejected.contains(&code) {
                metrics::counter!("shortlink_code_collisions_total").increment(1);
                warn!(code = %code, attempt, "Generator repeated a rejected code");
                continue;
            }

            match self
                .repository
                .insert(NewShortLink::new(code, target_url))
                .await
            {
                Ok(link) => {
                    metrics::counter!("shortlink_allocations_total").increment(1);
                    info!(code = %link.code, attempt, "Allocated short link");
                    return Ok(link);
                }
                Err(StoreError::UniqueViolation(code)) => {
                    metrics::counter!("shortlink_code_collisions_total").increment(1);
                    warn!(code = %code, attempt, "Short code collision, regenerating");
                    rejected.push(code);
                }
                Err(StoreError::Unavailable(reason)) => {
                    error!(attempt, reason = %reason, "Store failed during allocation");
                    return Err(AppError::store_unavailable(
                        "Failed to store short link",
                        json!({ "reason": reason, "attempt": attempt }),
                    ));
                }
            }
        }

        metrics::counter!("shortlink_allocation_exhausted_total").increment(1);
        error!(
            attempts = MAX_ALLOCATION_ATTEMPTS,
            "Short code allocation exhausted its retries"
        );

        Err(AppError::ExhaustedRetries {
            attempts: MAX_ALLOCATION_ATTEMPTS,
        })
    }
}
