//! Autokey XOR cipher used by the outlet protocol.
//!
//! Each plaintext byte is XORed with a running key. The key starts at
//! [`INITIAL_KEY`] and is replaced by every ciphertext byte produced, in both
//! directions, so decryption mirrors encryption exactly.

/// Key byte used for the first byte of every message.
pub const INITIAL_KEY: u8 = 0xAB;

/// Encrypts `plaintext`. The output has the same length as the input.
pub fn encrypt(plaintext: &[u8]) -> Vec<u8> {
    let mut key = INITIAL_KEY;
    plaintext
        .iter()
        .map(|&byte| {
            let cipher = byte ^ key;
            key = cipher;
            cipher
        })
        .collect()
}

/// Decrypts `ciphertext`. The output has the same length as the input.
pub fn decrypt(ciphertext: &[u8]) -> Vec<u8> {
    let mut key = INITIAL_KEY;
    ciphertext
        .iter()
        .map(|&byte| {
            let plain = byte ^ key;
            key = byte;
            plain
        })
        .collect()
}
