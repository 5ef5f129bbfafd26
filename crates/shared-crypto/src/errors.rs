//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Private scalar is zero, out of range or the wrong length
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// Byte string is not the SEC1 encoding of a point on P-224
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Input had the wrong length
    #[error("Invalid length for {what}: expected {expected}, got {actual}")]
    InvalidLength {
        /// What was being parsed
        what: &'static str,
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// AEAD tag did not verify
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// Encryption failed
    #[error("Encryption failed")]
    EncryptionFailed,
}
