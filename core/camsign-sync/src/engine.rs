//! Reconciliation engine — decides the indicator state and applies it.

use crate::error::SyncResult;
use crate::store::StatusStore;
use camsign_plug::Actuator;
use camsign_types::{DeviceId, StatusTable};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Reports older than this no longer count towards the desired state.
pub const DEFAULT_FRESHNESS_WINDOW: Duration = Duration::from_secs(15 * 60);

/// Cadence of the background reconciliation task.
pub const DEFAULT_SYNC_INTERVAL: Duration = Duration::from_secs(60);

/// Configuration for the reconciler.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Maximum age of a report that still influences the desired state.
    pub freshness_window: Duration,
    /// Period of the background reconciliation task.
    pub sync_interval: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            freshness_window: DEFAULT_FRESHNESS_WINDOW,
            sync_interval: DEFAULT_SYNC_INTERVAL,
        }
    }
}

/// Returns true iff some report no older than `window` at `now` has the
/// camera on.
pub fn desired_state(table: &StatusTable, now: DateTime<Utc>, window: Duration) -> bool {
    let window = chrono::Duration::from_std(window).unwrap_or(chrono::Duration::MAX);
    table
        .values()
        .any(|status| status.camera_on && !status.is_stale(now, window))
}

/// Drives the indicator from the contents of the status store.
pub struct Reconciler {
    store: Arc<StatusStore>,
    actuator: Arc<dyn Actuator>,
    config: SyncConfig,
}

impl Reconciler {
    /// Creates a reconciler over `store` that switches `actuator`.
    pub fn new(store: Arc<StatusStore>, actuator: Arc<dyn Actuator>, config: SyncConfig) -> Self {
        Self {
            store,
            actuator,
            config,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &Arc<StatusStore> {
        &self.store
    }

    /// Runs one reconciliation pass and returns the state applied.
    ///
    /// The outlet is always commanded, even if it is believed to already be
    /// in the desired state.
    pub async fn sync(&self) -> SyncResult<bool> {
        let table = self.store.snapshot().await;
        let desired_on = desired_state(&table, Utc::now(), self.config.freshness_window);
        debug!(
            "Reconciling {} device(s): desired_on={}",
            table.len(),
            desired_on
        );

        self.actuator.apply(desired_on).await?;
        Ok(desired_on)
    }

    /// Accepts a report and, if it changed the device's state, reconciles
    /// before returning. Returns whether the state changed.
    ///
    /// The report stays recorded even when the reconciliation fails.
    pub async fn report(&self, device_id: DeviceId, camera_on: bool) -> SyncResult<bool> {
        let changed = self.store.upsert(device_id.clone(), camera_on).await;
        if changed {
            info!("Camera state changed for {}: camera_on={}", device_id, camera_on);
            self.sync().await?;
        }
        Ok(changed)
    }

    /// Returns a copy of the status table.
    pub async fn snapshot(&self) -> StatusTable {
        self.store.snapshot().await
    }

    /// Forgets every device. Does not touch the outlet.
    pub async fn clear(&self) {
        self.store.clear().await;
        info!("Status table cleared");
    }
}
