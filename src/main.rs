//! Redis Proxy - A caching HTTP proxy in front of Redis
//!
//! Serves reads from a bounded local cache with TTL expiration and LRU
//! eviction, falls back to Redis on miss, and writes updates through to Redis.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::BufReader;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use redis_proxy::{
    console, create_router, spawn_expiry_task, AppMode, AppState, ConcurrencyLimit, Config,
    Coordinator, LocalCache, RedisStore,
};

/// Main entry point for the proxy.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Connect to Redis
/// 4. Create the local cache and start the TTL expiry task
/// 5. Serve HTTP (or the console when `APP_MODE=2`)
/// 6. On SIGINT/SIGTERM: stop the expiry task and drain pending cache fills
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "redis_proxy=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Redis Proxy");

    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        "Configuration loaded: redis_url={}, redis_ttl={:?}, port={}, cache_key_capacity={:?}, cache_ttl={:?}, proxy_client_limit={:?}, mode={:?}",
        config.redis_url,
        config.redis_ttl,
        config.port,
        config.cache_key_capacity,
        config.cache_ttl,
        config.proxy_client_limit,
        config.mode
    );

    let store = RedisStore::connect(&config.redis_url, config.redis_ttl)
        .await
        .context("Failed to connect to the backing store")?;

    let cache = LocalCache::new(config.cache_capacity(), config.cache_ttl);
    info!(
        "Local cache ready: capacity={} (0 = unbounded), ttl={:?}",
        cache.capacity(),
        cache.ttl()
    );
    let shutdown = CancellationToken::new();
    let expiry_handle = spawn_expiry_task(cache.clone(), shutdown.clone());
    if expiry_handle.is_none() {
        info!("CACHE_TTL not set, local entries never expire");
    }

    let coordinator = Arc::new(
        Coordinator::new(cache.clone(), Arc::new(store))
            .with_backing_timeout(config.redis_timeout),
    );

    match config.mode {
        AppMode::Console => {
            let stdin = BufReader::new(tokio::io::stdin());
            console::run_console(&coordinator, stdin, tokio::io::stdout())
                .await
                .context("Console I/O failed")?;
        }
        AppMode::Http => {
            let admission = config.proxy_client_limit.map(ConcurrencyLimit::new);
            let app = create_router(AppState::new(coordinator.clone()), admission);

            let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;
            info!("Server listening on http://{}", addr);

            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await
                .context("HTTP server failed")?;
        }
    }

    // Stop the sweep and let in-flight cache fills land
    shutdown.cancel();
    if let Some(handle) = expiry_handle {
        if let Err(e) = handle.await {
            warn!("Expiry task ended abnormally: {}", e);
        }
    }
    coordinator.shutdown().await;

    let stats = cache.stats().await;
    info!(
        "Shutdown complete: entries={}, hits={}, misses={}, hit_rate={:.2}, evictions={}, expirations={}",
        stats.total_entries,
        stats.hits,
        stats.misses,
        stats.hit_rate(),
        stats.evictions,
        stats.expirations
    );

    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
