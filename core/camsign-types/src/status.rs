//! Camera status records.

use crate::ids::DeviceId;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current status of every device that has reported, keyed by device ID.
///
/// Ordered so the JSON encoding is stable across requests.
pub type StatusTable = BTreeMap<DeviceId, DeviceStatus>;

/// The last camera state reported by one device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceStatus {
    /// Whether the device reported its camera as in use.
    pub camera_on: bool,
    /// When the server accepted the report.
    pub last_sync: DateTime<Utc>,
}

impl DeviceStatus {
    /// Creates a status record.
    #[must_use]
    pub const fn new(camera_on: bool, last_sync: DateTime<Utc>) -> Self {
        Self {
            camera_on,
            last_sync,
        }
    }

    /// Time elapsed between the report and `now`.
    #[must_use]
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.last_sync
    }

    /// Returns true if the report is older than `window` at `now`.
    #[must_use]
    pub fn is_stale(&self, now: DateTime<Utc>, window: Duration) -> bool {
        self.age(now) > window
    }
}

/// Body of a status report submitted by a client.
///
/// Only `cameraOn` is read, and a missing `cameraOn` means `false`. A
/// `lastSync` sent by the client is ignored; the server stamps the time
/// itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    #[serde(default)]
    pub camera_on: bool,
}

impl StatusReport {
    /// Decodes a report from a JSON request body.
    pub fn from_json(body: &[u8]) -> crate::Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }
}
