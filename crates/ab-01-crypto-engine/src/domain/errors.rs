//! # Decrypt Errors

use shared_crypto::CryptoError;
use shared_types::{Classify, ErrorKind};
use thiserror::Error;

/// Errors that can occur while decrypting a single report.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecryptError {
    /// Payload is too short to hold the header and the sealed tail
    #[error("Malformed payload: {len} bytes, need at least {min}")]
    Truncated { len: usize, min: usize },

    /// The embedded ephemeral key is not a P-224 point
    #[error("Invalid ephemeral key: {0}")]
    InvalidEphemeralKey(CryptoError),

    /// AEAD tag did not verify (corrupted report or wrong private key)
    #[error("Authentication failed for {payload_len}-byte payload")]
    AuthenticationFailed { payload_len: usize },

    /// The configured private key is not a usable P-224 scalar
    #[error("Invalid location private key")]
    InvalidPrivateKey,
}

impl Classify for DecryptError {
    fn kind(&self) -> ErrorKind {
        match self {
            DecryptError::InvalidPrivateKey => ErrorKind::Configuration,
            _ => ErrorKind::Decrypt,
        }
    }
}
