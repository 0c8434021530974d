//! Status store and reconciliation engine for camsign.
//!
//! Devices report whether their camera is in use. The store keeps the last
//! report per device; the reconciler folds the fresh reports into a single
//! desired state for the indicator outlet and applies it.
//!
//! ## Components
//!
//! - **Store**: concurrent map of device ID to last reported status
//! - **Engine**: decision rule and the reconciliation pass
//! - **Scheduler**: the recurring, cancellable reconciliation task
//!
//! ## Triggers
//!
//! 1. A report that changes a device's state reconciles synchronously.
//! 2. A background task reconciles on a fixed cadence regardless.
//!
//! Staleness is only evaluated during a pass; nothing is ever evicted.
//!
//! # Example
//!
//! ```
//! use camsign_plug::actuator::mock::RecordingActuator;
//! use camsign_sync::{Reconciler, StatusStore, SyncConfig};
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let actuator = RecordingActuator::new();
//! let reconciler = Reconciler::new(
//!     Arc::new(StatusStore::new()),
//!     Arc::new(actuator.clone()),
//!     SyncConfig::default(),
//! );
//!
//! let changed = reconciler.report("AA:BB:CC:DD:EE:FF".into(), true).await.unwrap();
//! assert!(changed);
//! assert_eq!(actuator.last(), Some(true));
//! # }
//! ```

mod engine;
mod error;
mod scheduler;
mod store;

pub use engine::{
    desired_state, Reconciler, SyncConfig, DEFAULT_FRESHNESS_WINDOW, DEFAULT_SYNC_INTERVAL,
};
pub use error::{ErrorKind, SyncError, SyncResult};
pub use scheduler::{SyncLoop, SyncLoopHandle};
pub use store::StatusStore;
