// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Process wiring: configuration, logging, collaborators and the server loop.

use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::api::{self, AppState};
use crate::cache::{MemoryCache, RedisCache, ValueCache};
use crate::chain::{AlloyChainReader, ChainReader};
use crate::config::{LogFormat, ServiceConfig, StoreBackend};
use crate::provider::{create_http_provider, ProviderConfig};
use crate::store::{MemoryStore, MongoStore, PostgresStore, RecordStore};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,sqlx=warn,hyper=warn,tower_http=info";

/// Main entry point for the application.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();

    // A config error is still logged, in the default format
    let config = ServiceConfig::from_env();
    init_tracing(config.as_ref().map(|c| c.log_format).unwrap_or_default())?;
    let config = config.context("Invalid configuration")?;

    info!(
        port = config.port,
        store = config.store.name(),
        cache = if config.redis_url.is_some() { "redis" } else { "memory" },
        request_timeout_ms = config.request_timeout.as_millis() as u64,
        rpc_max_retries = config.rpc_max_retries,
        "Starting ethinfo"
    );

    let shutdown = CancellationToken::new();
    let state = build_state(&config, shutdown.clone()).await?;

    let listener = TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("Failed to bind port {}", config.port))?;

    tokio::spawn(cancel_on_signal(shutdown.clone()));

    let lookup = state.lookup().clone();
    serve(listener, state, shutdown).await?;

    if let Some(stats) = lookup.cache_stats().await {
        info!(%stats, "Cache statistics");
    }
    Ok(())
}

/// Install the global `tracing` subscriber.
pub fn init_tracing(format: LogFormat) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match format {
        LogFormat::Json => builder.json().with_target(false).try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
    installed.map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {e}"))
}

/// Connect every collaborator named by `config`.
pub async fn build_state(
    config: &ServiceConfig,
    shutdown: CancellationToken,
) -> anyhow::Result<AppState> {
    let provider = create_http_provider(&ProviderConfig::from_service(config))?;
    let chain: Arc<dyn ChainReader> = Arc::new(AlloyChainReader::new(provider));

    let cache: Arc<dyn ValueCache> = match &config.redis_url {
        Some(url) => Arc::new(RedisCache::connect(url).await?),
        None => {
            info!("REDIS_URL not set, caching in process memory");
            Arc::new(MemoryCache::new())
        }
    };

    let store: Arc<dyn RecordStore> = match &config.store {
        StoreBackend::Mongo { uri, database } => Arc::new(MongoStore::connect(uri, database).await?),
        StoreBackend::Postgres { uri } => Arc::new(PostgresStore::connect(uri).await?),
        StoreBackend::Memory => {
            warn!("Using in-memory record store, snapshots are lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    Ok(AppState::new(chain, cache, store)
        .with_request_timeout(config.request_timeout)
        .with_shutdown(shutdown))
}

/// Serve the API on `listener` until `shutdown` is cancelled.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let app = api::router(state);
    let addr = listener.local_addr()?;

    info!(address = ?addr, "Starting server");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Cancel `shutdown` on Ctrl-C or, on Unix, SIGTERM.
async fn cancel_on_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutting down gracefully...");
    shutdown.cancel();
}
