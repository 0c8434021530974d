//! Core type definitions for camsign.
//!
//! This crate defines the types shared by the status store, the
//! reconciliation engine and the HTTP boundary:
//! - Device identifiers (hardware network addresses)
//! - Per-device camera status records and the status table
//! - The status report body submitted by clients

mod ids;
mod status;

pub use ids::DeviceId;
pub use status::{DeviceStatus, StatusReport, StatusTable};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid device id: {0:?}")]
    InvalidDeviceId(String),
}
