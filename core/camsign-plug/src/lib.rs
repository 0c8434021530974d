//! Client for the smart outlet that acts as the "camera in use" indicator.
//!
//! The outlet speaks a vendor control protocol on TCP port 9999: every
//! request is a JSON command, obfuscated with an autokey XOR cipher and
//! prefixed with its big-endian length. Responses use the same framing.
//!
//! # Components
//!
//! - **Cipher**: the autokey stream cipher (initial key `0xAB`)
//! - **Codec**: length-prefixed framing of encrypted payloads
//! - **Command**: the fixed JSON command bodies the outlet understands
//! - **Client**: one TCP connection per request, bounded by timeouts
//! - **Actuator**: the on/off seam used by the reconciliation engine
//!
//! # Example
//!
//! ```no_run
//! use camsign_plug::PlugClient;
//!
//! # async fn run() -> camsign_plug::PlugResult<()> {
//! let plug = PlugClient::new("192.168.1.50");
//! plug.turn_on().await?;
//! let info = plug.system_info().await?;
//! println!("{info}");
//! # Ok(())
//! # }
//! ```

pub mod actuator;
pub mod cipher;
mod client;
pub mod codec;
mod command;
mod error;

pub use actuator::Actuator;
pub use client::{PlugClient, CONNECT_TIMEOUT, DEFAULT_PORT};
pub use codec::{HEADER_LEN, MAX_RESPONSE_SIZE};
pub use command::PlugCommand;
pub use error::{PlugError, PlugResult};
