//! TCP client for the outlet.

use crate::actuator::Actuator;
use crate::codec::{self, MAX_RESPONSE_SIZE};
use crate::command::PlugCommand;
use crate::error::{PlugError, PlugResult};
use async_trait::async_trait;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

/// TCP port the outlet listens on.
pub const DEFAULT_PORT: u16 = 9999;

/// How long to wait for the outlet to accept a connection.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for a single outlet.
///
/// Holds no connection: every request dials the outlet, exchanges one frame
/// each way and hangs up.
#[derive(Debug, Clone)]
pub struct PlugClient {
    host: String,
    port: u16,
    connect_timeout: Duration,
    io_timeout: Duration,
}

impl PlugClient {
    /// Creates a client for the outlet at `host` on the default port.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            connect_timeout: CONNECT_TIMEOUT,
            io_timeout: CONNECT_TIMEOUT,
        }
    }

    /// Overrides the TCP port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Overrides the connect timeout and the timeout applied to the write
    /// and the read of each request.
    #[must_use]
    pub fn with_timeouts(mut self, connect: Duration, io: Duration) -> Self {
        self.connect_timeout = connect;
        self.io_timeout = io;
        self
    }

    /// The outlet's host name or address.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The outlet's TCP port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Sends `command` and returns the decrypted JSON response text.
    pub async fn send(&self, command: PlugCommand) -> PlugResult<String> {
        let addr = format!("{}:{}", self.host, self.port);
        debug!("Sending {} to plug at {}", command.name(), addr);

        let mut stream = match timeout(self.connect_timeout, TcpStream::connect(&addr)).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(source)) => return Err(PlugError::Connect { addr, source }),
            Err(_) => return Err(PlugError::ConnectTimeout { addr }),
        };

        let frame = codec::encode_frame(&command.to_json());
        timeout(self.io_timeout, stream.write_all(&frame))
            .await
            .map_err(|_| PlugError::IoTimeout)??;

        // A single read; short responses are not retried here.
        let mut buf = vec![0u8; MAX_RESPONSE_SIZE];
        let n = timeout(self.io_timeout, stream.read(&mut buf))
            .await
            .map_err(|_| PlugError::IoTimeout)??;

        let response = codec::decode_frame(&buf[..n])?;
        debug!("Plug answered {} with {} bytes", command.name(), response.len());
        Ok(response)
    }

    /// Switches the outlet on.
    pub async fn turn_on(&self) -> PlugResult<()> {
        self.send(PlugCommand::SetRelayState(true)).await.map(drop)
    }

    /// Switches the outlet off.
    pub async fn turn_off(&self) -> PlugResult<()> {
        self.send(PlugCommand::SetRelayState(false)).await.map(drop)
    }

    /// Returns the outlet's system information as JSON text.
    pub async fn system_info(&self) -> PlugResult<String> {
        self.send(PlugCommand::SystemInfo).await
    }

    /// Returns system information plus energy meter readings as JSON text.
    pub async fn meter_info(&self) -> PlugResult<String> {
        self.send(PlugCommand::MeterInfo).await
    }

    /// Returns per-day energy statistics for `month`/`year` as JSON text.
    pub async fn daily_stats(&self, month: u32, year: i32) -> PlugResult<String> {
        self.send(PlugCommand::DailyStats { month, year }).await
    }
}

#[async_trait]
impl Actuator for PlugClient {
    async fn turn_on(&self) -> PlugResult<()> {
        PlugClient::turn_on(self).await
    }

    async fn turn_off(&self) -> PlugResult<()> {
        PlugClient::turn_off(self).await
    }
}
