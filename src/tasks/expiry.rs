//! TTL Expiry Task
//!
//! Background task that periodically removes expired local cache entries.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cache::LocalCache;

/// Spawns the expiry sweep for `cache`, running once per cache TTL.
///
/// Returns `None` without spawning anything when the cache has no TTL. The
/// task stops at the next await point after `shutdown` is cancelled.
///
/// # Example
/// ```ignore
/// let shutdown = CancellationToken::new();
/// let handle = spawn_expiry_task(cache.clone(), shutdown.clone());
/// // Later, during shutdown:
/// shutdown.cancel();
/// ```
pub fn spawn_expiry_task(
    cache: LocalCache,
    shutdown: CancellationToken,
) -> Option<JoinHandle<()>> {
    let period = cache.ttl()?;
    Some(tokio::spawn(run_sweeps(cache, period, shutdown)))
}

async fn run_sweeps(cache: LocalCache, period: Duration, shutdown: CancellationToken) {
    info!("Starting TTL expiry task with period of {:?}", period);

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                info!("TTL expiry task stopped");
                return;
            }
            _ = tokio::time::sleep(period) => {}
        }

        let removed = cache.expire_sweep().await;

        if removed > 0 {
            info!("TTL sweep: removed {} expired entries", removed);
        } else {
            debug!("TTL sweep: no expired entries found");
        }
    }
}
