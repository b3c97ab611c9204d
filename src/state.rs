//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::domain::repositories::ShortLinkRepository;
use crate::infrastructure::cache::CacheService;

/// State shared by all HTTP handlers.
///
/// Cloned per request; every field is reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn ShortLinkRepository>>,
    pub cache: Arc<dyn CacheService>,
}

impl AppState {
    pub fn new(
        link_service: Arc<LinkService<dyn ShortLinkRepository>>,
        cache: Arc<dyn CacheService>,
    ) -> Self {
        Self {
            link_service,
            cache,
        }
    }
}
