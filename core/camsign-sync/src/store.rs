//! Concurrent store of per-device camera status.

use camsign_types::{DeviceId, DeviceStatus, StatusTable};
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

/// The last reported camera status of every device.
///
/// The table is only reachable through these methods. Snapshots share the
/// lock with each other; `upsert` and `clear` take it exclusively.
#[derive(Debug, Default)]
pub struct StatusStore {
    table: RwLock<StatusTable>,
}

impl StatusStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a report from `device_id`, stamped with the current time.
    ///
    /// Returns true when this is the device's first report or its camera
    /// state differs from the previous report.
    pub async fn upsert(&self, device_id: DeviceId, camera_on: bool) -> bool {
        let now = Utc::now();
        let mut table = self.table.write().await;

        let (changed, last_sync) = match table.get(&device_id) {
            Some(prev) => (prev.camera_on != camera_on, now.max(prev.last_sync)),
            None => (true, now),
        };
        debug!(
            "Status for {}: camera_on={} changed={}",
            device_id, camera_on, changed
        );
        table.insert(device_id, DeviceStatus::new(camera_on, last_sync));
        changed
    }

    /// Returns a copy of the current table.
    pub async fn snapshot(&self) -> StatusTable {
        self.table.read().await.clone()
    }

    /// Removes every entry.
    pub async fn clear(&self) {
        self.table.write().await.clear();
    }

    /// Number of devices that have reported.
    pub async fn len(&self) -> usize {
        self.table.read().await.len()
    }

    /// Returns true if no device has reported.
    pub async fn is_empty(&self) -> bool {
        self.table.read().await.is_empty()
    }
}
