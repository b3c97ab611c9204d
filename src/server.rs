//! HTTP server initialization and runtime setup.
//!
//! Builds the store adapter, cache and link service from [`Config`], then runs
//! the Axum server until shutdown.

use crate::application::services::LinkService;
use crate::config::{Config, StoreBackend};
use crate::domain::repositories::ShortLinkRepository;
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::persistence::{InMemoryShortLinkRepository, PgShortLinkRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

/// Connects to PostgreSQL, retrying with exponential backoff.
///
/// Makes `1 + config.db_connect_retries` attempts in total, with delays
/// starting at 100ms and capped at 5s.
///
/// # Errors
///
/// Returns the last connection error once retries are exhausted.
pub async fn connect_pg(config: &Config) -> Result<PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL is required for the postgres store backend")?;

    let strategy = ExponentialBackoff::from_millis(2)
        .factor(50)
        .max_delay(Duration::from_secs(5))
        .map(jitter)
        .take(config.db_connect_retries);

    let pool = Retry::spawn(strategy, move || async move {
        config
            .pg_pool_options()
            .connect(database_url)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Database connection attempt failed"))
    })
    .await
    .context("Failed to connect to database")?;

    tracing::info!("Connected to database");
    Ok(pool)
}

/// Builds the store adapter selected by `config.store_backend`.
///
/// For PostgreSQL this also applies pending migrations.
pub async fn build_repository(config: &Config) -> Result<Arc<dyn ShortLinkRepository>> {
    match config.store_backend {
        StoreBackend::Postgres => {
            let pool = connect_pg(config).await?;

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;
            tracing::info!("Migrations applied");

            Ok(Arc::new(PgShortLinkRepository::new(Arc::new(pool))))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; links are lost on restart");
            Ok(Arc::new(InMemoryShortLinkRepository::new()))
        }
    }
}

/// Connects the redirect cache, falling back to [`NullCache`].
pub async fn build_cache(config: &Config) -> Arc<dyn CacheService> {
    let Some(redis_url) = &config.redis_url else {
        tracing::info!("Cache disabled (NullCache)");
        return Arc::new(NullCache::new());
    };

    match RedisCache::connect(redis_url, config.cache_ttl_seconds).await {
        Ok(redis) => {
            tracing::info!("Cache enabled (Redis)");
            Arc::new(redis)
        }
        Err(e) => {
            tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
            Arc::new(NullCache::new())
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if the store cannot be initialized, the listener cannot
/// bind, or the server fails at runtime.
pub async fn run(config: Config) -> Result<()> {
    let repository = build_repository(&config).await?;
    let cache = build_cache(&config).await;

    let link_service = Arc::new(LinkService::new(repository, config.base_url.clone()));
    let state = AppState::new(link_service, cache);

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
