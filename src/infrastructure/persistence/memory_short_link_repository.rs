//! In-memory implementation of the short link store.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::{ShortLinkRepository, StoreError};

/// Process-local short link store backed by [`DashMap`].
///
/// The code map's entry API holds the shard lock between the vacancy check and
/// the write, which makes [`insert`](ShortLinkRepository::insert) an atomic
/// conditional insert. The target index keeps the first committed code per URL.
///
/// Data is lost when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryShortLinkRepository {
    by_code: DashMap<String, ShortLink>,
    by_target: DashMap<String, String>,
    next_id: AtomicI64,
}

impl InMemoryShortLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every committed code.
    pub fn codes(&self) -> Vec<String> {
        self.by_code.iter().map(|e| e.key().clone()).collect()
    }
}

#[async_trait]
impl ShortLinkRepository for InMemoryShortLinkRepository {
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, StoreError> {
        let NewShortLink { code, target_url } = new_link;

        match self.by_code.entry(code) {
            Entry::Occupied(occupied) => Err(StoreError::UniqueViolation(occupied.key().clone())),
            Entry::Vacant(vacant) => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
                let link = ShortLink::new(id, vacant.key().clone(), target_url, Utc::now());

                self.by_target
                    .entry(link.target_url.clone())
                    .or_insert_with(|| link.code.clone());
                vacant.insert(link.clone());

                Ok(link)
            }
        }
    }

    async fn find_by_target_url(
        &self,
        target_url: &str,
    ) -> Result<Option<ShortLink>, StoreError> {
        let Some(code) = self.by_target.get(target_url).map(|c| c.value().clone()) else {
            return Ok(None);
        };

        Ok(self.by_code.get(&code).map(|link| link.value().clone()))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, StoreError> {
        Ok(self.by_code.get(code).map(|link| link.value().clone()))
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(self.by_code.len() as i64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
