//! Error types for the outlet client.

use thiserror::Error;

/// Result type for outlet operations.
pub type PlugResult<T> = Result<T, PlugError>;

/// Errors that can occur while talking to the outlet.
#[derive(Debug, Error)]
pub enum PlugError {
    /// The TCP connection could not be established (refused, unreachable).
    #[error("cannot connect to plug at {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The TCP connection was not established within the connect timeout.
    #[error("timed out connecting to plug at {addr}")]
    ConnectTimeout { addr: String },

    /// Reading or writing on an established connection failed.
    #[error("plug i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Reading or writing on an established connection took too long.
    #[error("plug i/o timed out")]
    IoTimeout,

    /// The outlet sent something that is not a valid response frame.
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl PlugError {
    /// Returns true for failures of the network path to the outlet.
    pub fn is_transport(&self) -> bool {
        !matches!(self, Self::Protocol(_))
    }
}
