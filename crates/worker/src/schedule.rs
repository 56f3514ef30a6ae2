//! Periodic safety-net sweep.
//!
//! Registration triggers a run right away, but a trigger can be lost (the
//! process restarts, a run is cut short by a timeout). The sweep re-runs the
//! worker on a fixed interval so missing pairs are always picked up
//! eventually.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::combiner::CombinationWorker;

/// Run the worker every `interval` until `cancel` is triggered.
///
/// The first tick fires immediately, so a restart catches up at once.
pub async fn run_periodically(
    worker: Arc<CombinationWorker>,
    interval: Duration,
    cancel: CancellationToken,
) {
    tracing::info!(interval_secs = interval.as_secs(), "Combination sweep started");

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Combination sweep stopping");
                break;
            }
            _ = ticker.tick() => {
                match worker.run().await {
                    Ok(summary) => {
                        tracing::debug!(
                            total = summary.total,
                            succeeded = summary.succeeded,
                            "Combination sweep pass complete",
                        );
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Combination sweep pass failed");
                    }
                }
            }
        }
    }
}
