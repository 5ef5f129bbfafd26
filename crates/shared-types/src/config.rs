//! # Bridge Configuration
//!
//! Process-wide key material and key-template parameters.
//!
//! ## Security Requirements
//!
//! - The location private key is zeroized on drop and never printed by `Debug`.
//! - Configuration is immutable once built; share it as `Arc<BridgeConfig>`.

use crate::entities::{AdvertisementKey, PUBLIC_KEY_LEN};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of a P-224 private scalar.
pub const PRIVATE_KEY_LEN: usize = 28;

/// Default bound on the valid-key search.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 500;

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A key had the wrong length.
    #[error("{name} must be {expected} bytes, got {actual}")]
    InvalidKeyLength {
        /// Which key was rejected.
        name: &'static str,
        /// Required length in bytes.
        expected: usize,
        /// Supplied length in bytes.
        actual: usize,
    },

    /// The key search bound was zero.
    #[error("key search attempt bound must be positive")]
    ZeroAttemptBound,

    /// Unknown key layout name.
    #[error("unknown key layout '{0}', expected 'index-first' or 'message-first'")]
    UnknownLayout(String),
}

/// The P-224 private key that decrypts the device's own location reports.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct LocationPrivateKey([u8; PRIVATE_KEY_LEN]);

impl LocationPrivateKey {
    /// Create from raw scalar bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ConfigError> {
        let key: [u8; PRIVATE_KEY_LEN] =
            bytes
                .try_into()
                .map_err(|_| ConfigError::InvalidKeyLength {
                    name: "location private key",
                    expected: PRIVATE_KEY_LEN,
                    actual: bytes.len(),
                })?;
        Ok(Self(key))
    }

    /// Get inner bytes.
    pub fn as_bytes(&self) -> &[u8; PRIVATE_KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for LocationPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LocationPrivateKey(<redacted>)")
    }
}

/// Byte layout of a data-bit advertisement key.
///
/// Both layouts put the two magic bytes first, the modem id at bytes 10..14,
/// the search attempt at bytes 14..18 and the bit flag in the last byte.
/// They differ in the order of the bit index and the message id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyLayout {
    /// `[magic:2][bit index:4][message id:4][modem id:4][attempt:4][0..][bit:1]`
    #[default]
    IndexFirst,
    /// `[magic:2][message id:4][bit index:4][modem id:4][attempt:4][0..][bit:1]`
    MessageFirst,
}

impl FromStr for KeyLayout {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "index-first" | "index_first" => Ok(KeyLayout::IndexFirst),
            "message-first" | "message_first" => Ok(KeyLayout::MessageFirst),
            other => Err(ConfigError::UnknownLayout(other.to_string())),
        }
    }
}

impl fmt::Display for KeyLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyLayout::IndexFirst => f.write_str("index-first"),
            KeyLayout::MessageFirst => f.write_str("message-first"),
        }
    }
}

/// Firmware-specific parameters of the data-bit key template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyTemplateParams {
    /// Which byte layout the beacon firmware uses.
    pub layout: KeyLayout,
    /// Two magic prefix bytes.
    pub magic: [u8; 2],
    /// Four-byte modem (device) id.
    pub modem_id: [u8; 4],
    /// Upper bound on attempt values tried by the valid-key search.
    pub max_attempts: u32,
}

impl KeyTemplateParams {
    /// Build template parameters from raw magic and modem id bytes.
    pub fn new(layout: KeyLayout, magic: &[u8], modem_id: &[u8]) -> Result<Self, ConfigError> {
        let magic: [u8; 2] = magic.try_into().map_err(|_| ConfigError::InvalidKeyLength {
            name: "data prefix magic",
            expected: 2,
            actual: magic.len(),
        })?;
        let modem_id: [u8; 4] =
            modem_id
                .try_into()
                .map_err(|_| ConfigError::InvalidKeyLength {
                    name: "data modem id",
                    expected: 4,
                    actual: modem_id.len(),
                })?;
        Ok(Self {
            layout,
            magic,
            modem_id,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        })
    }

    /// Override the attempt bound.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}

/// Complete bridge configuration.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Key that decrypts the device's location reports.
    pub location_private_key: LocationPrivateKey,
    /// Advertisement key the device broadcasts when beaconing its location.
    pub location_advertisement_key: AdvertisementKey,
    /// Data-bit key template parameters.
    pub template: KeyTemplateParams,
}

impl BridgeConfig {
    /// Assemble and validate a configuration from raw key bytes.
    pub fn new(
        location_private_key: &[u8],
        location_advertisement_key: &[u8],
        template: KeyTemplateParams,
    ) -> Result<Self, ConfigError> {
        let location_private_key = LocationPrivateKey::from_slice(location_private_key)?;
        let location_advertisement_key: AdvertisementKey = location_advertisement_key
            .try_into()
            .map_err(|_| ConfigError::InvalidKeyLength {
                name: "location advertisement key",
                expected: PUBLIC_KEY_LEN,
                actual: location_advertisement_key.len(),
            })?;

        let config = Self {
            location_private_key,
            location_advertisement_key,
            template,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate invariants that the typed fields cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.template.max_attempts == 0 {
            return Err(ConfigError::ZeroAttemptBound);
        }
        Ok(())
    }
}
