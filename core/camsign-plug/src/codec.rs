//! Framing for outlet messages.
//!
//! A frame is a 4-byte big-endian length followed by the encrypted payload.
//! The length counts plaintext bytes, which equals the ciphertext length
//! because the cipher preserves length.

use crate::cipher;
use crate::error::{PlugError, PlugResult};

/// Size of the length prefix.
pub const HEADER_LEN: usize = 4;

/// Receive buffer size; responses are read with a single read of at most
/// this many bytes.
pub const MAX_RESPONSE_SIZE: usize = 4096;

/// Encrypts `plaintext` and prepends its length.
pub fn encode_frame(plaintext: &str) -> Vec<u8> {
    let payload = cipher::encrypt(plaintext.as_bytes());

    let mut frame = Vec::with_capacity(HEADER_LEN + payload.len());
    frame.extend_from_slice(&(plaintext.len() as u32).to_be_bytes());
    frame.extend_from_slice(&payload);
    frame
}

/// Strips the length prefix from a received frame and decrypts the rest.
///
/// The prefix is not checked against the payload: whatever was received
/// after the header is decrypted, as the outlet's own clients do.
pub fn decode_frame(frame: &[u8]) -> PlugResult<String> {
    if frame.len() < HEADER_LEN {
        return Err(PlugError::Protocol(format!(
            "response too short: {} bytes",
            frame.len()
        )));
    }

    let plaintext = cipher::decrypt(&frame[HEADER_LEN..]);
    String::from_utf8(plaintext)
        .map_err(|e| PlugError::Protocol(format!("response is not UTF-8: {e}")))
}
