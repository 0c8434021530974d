//! Error types for the sync layer.

use camsign_plug::PlugError;
use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur while accepting reports or reconciling.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The outlet could not be driven.
    #[error("error setting plug state: {0}")]
    Plug(#[from] PlugError),

    /// Encoding or decoding JSON failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A client sent a report that could not be understood.
    #[error("malformed input: {0}")]
    MalformedInput(String),
}

/// Closed classification of [`SyncError`] so callers can branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Serialization,
    MalformedInput,
}

impl SyncError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            // An unreadable outlet reply counts as a failure of the link too.
            Self::Plug(_) => ErrorKind::Transport,
            Self::Serialization(_) => ErrorKind::Serialization,
            Self::MalformedInput(_) => ErrorKind::MalformedInput,
        }
    }
}

impl From<camsign_types::Error> for SyncError {
    fn from(err: camsign_types::Error) -> Self {
        Self::MalformedInput(err.to_string())
    }
}
