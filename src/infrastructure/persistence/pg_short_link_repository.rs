//! PostgreSQL implementation of the short link store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::{ShortLinkRepository, StoreError};
use crate::utils::db_error::{classify_insert_error, unavailable};

#[derive(sqlx::FromRow)]
struct ShortLinkRow {
    id: i64,
    code: String,
    target_url: String,
    created_at: DateTime<Utc>,
}

impl From<ShortLinkRow> for ShortLink {
    fn from(row: ShortLinkRow) -> Self {
        ShortLink::new(row.id, row.code, row.target_url, row.created_at)
    }
}

/// PostgreSQL repository for short links.
///
/// Code uniqueness is enforced by the `short_links_code_key` constraint; a
/// plain `INSERT` is the atomic conditional insert the allocator relies on.
pub struct PgShortLinkRepository {
    pool: Arc<PgPool>,
}

impl PgShortLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShortLinkRepository for PgShortLinkRepository {
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, StoreError> {
        sqlx::query_as::<_, ShortLinkRow>(
            r#"
            INSERT INTO short_links (code, target_url)
            VALUES ($1, $2)
            RETURNING id, code, target_url, created_at
            "#,
        )
        .bind(&new_link.code)
        .bind(&new_link.target_url)
        .fetch_one(self.pool.as_ref())
        .await
        .map(ShortLink::from)
        .map_err(|e| classify_insert_error(e, &new_link.code))
    }

    async fn find_by_target_url(
        &self,
        target_url: &str,
    ) -> Result<Option<ShortLink>, StoreError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            SELECT id, code, target_url, created_at
            FROM short_links
            WHERE target_url = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(target_url)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(unavailable)?;

        Ok(row.map(ShortLink::from))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, StoreError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            SELECT id, code, target_url, created_at
            FROM short_links
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(unavailable)?;

        Ok(row.map(ShortLink::from))
    }

    async fn count(&self) -> Result<i64, StoreError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM short_links")
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(unavailable)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .map(|_| ())
            .map_err(unavailable)
    }
}
