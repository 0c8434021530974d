//! Recurring reconciliation task.

use crate::engine::Reconciler;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Background task that reconciles on a fixed cadence.
pub struct SyncLoop;

impl SyncLoop {
    /// Spawns the loop on the current tokio runtime.
    ///
    /// The first pass runs one interval after spawning. A failed pass is
    /// logged and the loop waits for the next tick.
    pub fn spawn(reconciler: Arc<Reconciler>) -> SyncLoopHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let period = reconciler.config().sync_interval;

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            info!("Sync loop started ({:?} interval)", period);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match reconciler.sync().await {
                            Ok(on) => debug!("Periodic sync applied camera_on={}", on),
                            Err(e) => warn!("Error syncing sign: {}", e),
                        }
                    }
                    _ = shutdown_rx.changed() => {
                        info!("Sync loop shutting down");
                        break;
                    }
                }
            }
        });

        SyncLoopHandle { shutdown_tx, task }
    }
}

/// Handle to a running [`SyncLoop`]. Dropping it also stops the loop.
pub struct SyncLoopHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SyncLoopHandle {
    /// Signals the loop to stop and waits for it. A pass already in
    /// progress runs to completion first.
    pub async fn shutdown(self) {
        // The receiver lives as long as the task; a send error means the
        // task already ended.
        let _ = self.shutdown_tx.send(true);
        if let Err(e) = self.task.await {
            warn!("Sync loop ended abnormally: {}", e);
        }
    }

    /// Returns true once the loop has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
