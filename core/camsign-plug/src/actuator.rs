//! The on/off seam between the reconciliation engine and the indicator.

use crate::error::PlugResult;
use async_trait::async_trait;

/// A physical indicator that can be switched on and off.
#[async_trait]
pub trait Actuator: Send + Sync {
    /// Switches the indicator on.
    async fn turn_on(&self) -> PlugResult<()>;

    /// Switches the indicator off.
    async fn turn_off(&self) -> PlugResult<()>;

    /// Switches the indicator to `on`.
    async fn apply(&self, on: bool) -> PlugResult<()> {
        if on {
            self.turn_on().await
        } else {
            self.turn_off().await
        }
    }
}

/// An in-memory actuator for testing.
pub mod mock {
    use super::*;
    use crate::error::PlugError;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    /// Records every state it is asked to apply.
    ///
    /// Clones share the same record, so a test can keep one clone and hand
    /// another to the code under test.
    #[derive(Debug, Clone, Default)]
    pub struct RecordingActuator {
        applied: Arc<Mutex<Vec<bool>>>,
        failing: Arc<AtomicBool>,
    }

    impl RecordingActuator {
        /// Creates an actuator that accepts every command.
        pub fn new() -> Self {
            Self::default()
        }

        /// Makes subsequent commands fail (`true`) or succeed (`false`).
        /// Failed commands are still recorded.
        pub fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        /// All states applied so far, oldest first.
        pub fn applied(&self) -> Vec<bool> {
            self.applied.lock().unwrap().clone()
        }

        /// The most recently applied state.
        pub fn last(&self) -> Option<bool> {
            self.applied.lock().unwrap().last().copied()
        }

        fn record(&self, on: bool) -> PlugResult<()> {
            self.applied.lock().unwrap().push(on);
            if self.failing.load(Ordering::SeqCst) {
                return Err(PlugError::ConnectTimeout {
                    addr: "mock".to_string(),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl Actuator for RecordingActuator {
        async fn turn_on(&self) -> PlugResult<()> {
            self.record(true)
        }

        async fn turn_off(&self) -> PlugResult<()> {
            self.record(false)
        }
    }
}
