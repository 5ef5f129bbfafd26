//! # Crypto Engine Service
//!
//! Application service that implements `LocationDecryptionApi` by binding the
//! configured location private key to the domain pipeline.

use crate::domain::decrypt::decrypt_report;
use crate::domain::errors::DecryptError;
use crate::ports::inbound::LocationDecryptionApi;
use p224::SecretKey;
use shared_crypto::parse_private_key;
use shared_types::{BridgeConfig, DecryptedLocation, LocationPrivateKey};
use tracing::trace;

/// Decrypts reports for the device owning `private_key`.
pub struct CryptoEngine {
    private_key: SecretKey,
}

impl CryptoEngine {
    /// Create an engine from raw key material.
    ///
    /// # Errors
    ///
    /// `DecryptError::InvalidPrivateKey` if the bytes are not a valid P-224 scalar.
    pub fn new(private_key: &LocationPrivateKey) -> Result<Self, DecryptError> {
        let private_key = parse_private_key(private_key.as_bytes())
            .map_err(|_| DecryptError::InvalidPrivateKey)?;
        Ok(Self { private_key })
    }

    /// Create an engine for the location key in `config`.
    pub fn from_config(config: &BridgeConfig) -> Result<Self, DecryptError> {
        Self::new(&config.location_private_key)
    }
}

impl LocationDecryptionApi for CryptoEngine {
    fn decrypt(&self, payload: &[u8]) -> Result<DecryptedLocation, DecryptError> {
        let result = decrypt_report(payload, &self.private_key);
        if let Err(e) = &result {
            trace!("[ab-01] report of {} bytes rejected: {}", payload.len(), e);
        }
        result
    }
}
