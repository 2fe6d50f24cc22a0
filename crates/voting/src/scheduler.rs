//! Periodic launch rotation.
//!
//! Calls [`LaunchLifecycle::ensure_active_launch`] on a fixed interval so a
//! new launch exists as soon as the previous one ends. Runs until the
//! cancellation token fires.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::lifecycle::LaunchLifecycle;

/// Default rotation interval: 1 hour.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(3600);

/// Run the launch rotation loop. The first tick fires immediately.
pub async fn run(lifecycle: LaunchLifecycle, interval: Duration, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = interval.as_secs(),
        "Launch rotation job started"
    );

    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Launch rotation job stopping");
                break;
            }
            _ = ticker.tick() => {
                match lifecycle.ensure_active_launch().await {
                    Ok(launch) => {
                        tracing::debug!(launch_id = launch.id, name = %launch.name, "Launch rotation: active launch ensured");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Launch rotation: ensure failed");
                    }
                }
            }
        }
    }
}
