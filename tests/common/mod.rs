#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use shortlink::application::services::LinkService;
use shortlink::domain::entities::{NewShortLink, ShortLink};
use shortlink::domain::repositories::{ShortLinkRepository, StoreError};
use shortlink::infrastructure::cache::NullCache;
use shortlink::infrastructure::persistence::InMemoryShortLinkRepository;
use shortlink::state::AppState;
use shortlink::utils::code_generator::CodeGenerator;

pub const BASE_URL: &str = "https://s.example.com";

pub fn create_test_state(repo: Arc<dyn ShortLinkRepository>) -> AppState {
    let link_service = Arc::new(LinkService::new(repo, BASE_URL));

    AppState::new(link_service, Arc::new(NullCache))
}

/// Extracts the code from a `<base>/r/<code>` short URL.
pub fn code_of(short_url: &str) -> &str {
    short_url
        .rsplit_once("/r/")
        .map(|(_, code)| code)
        .expect("short url contains /r/")
}

pub async fn seed_link(repo: &InMemoryShortLinkRepository, code: &str, url: &str) -> ShortLink {
    repo.insert(NewShortLink::new(code, url)).await.unwrap()
}

/// In-memory store that counts insert attempts.
#[derive(Default)]
pub struct CountingRepository {
    pub inner: InMemoryShortLinkRepository,
    inserts: AtomicUsize,
}

impl CountingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inserts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ShortLinkRepository for CountingRepository {
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, StoreError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.inner.insert(new_link).await
    }

    async fn find_by_target_url(
        &self,
        target_url: &str,
    ) -> Result<Option<ShortLink>, StoreError> {
        self.inner.find_by_target_url(target_url).await
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, StoreError> {
        self.inner.find_by_code(code).await
    }

    async fn count(&self) -> Result<i64, StoreError> {
        self.inner.count().await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping().await
    }
}

/// Store whose every operation fails as if the backend were down.
pub struct UnavailableRepository;

#[async_trait]
impl ShortLinkRepository for UnavailableRepository {
    async fn insert(&self, _new_link: NewShortLink) -> Result<ShortLink, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn find_by_target_url(
        &self,
        _target_url: &str,
    ) -> Result<Option<ShortLink>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn find_by_code(&self, _code: &str) -> Result<Option<ShortLink>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

/// Generator walking a fixed sequence `pool00`, `pool01`, ... and wrapping.
///
/// Separate instances draw the same sequence, which forces collisions
/// between allocators sharing a store.
pub struct SequenceGenerator {
    size: usize,
    next: AtomicUsize,
}

impl SequenceGenerator {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            next: AtomicUsize::new(0),
        }
    }

    pub fn code(i: usize) -> String {
        format!("pool{:02}", i)
    }
}

impl CodeGenerator for SequenceGenerator {
    fn generate(&self) -> String {
        let i = self.next.fetch_add(1, Ordering::SeqCst);
        Self::code(i % self.size)
    }
}
