//! # Runtime Configuration
//!
//! Settings of the runtime itself plus the encoded key material it turns
//! into a `BridgeConfig`.
//!
//! ## Security Requirements
//!
//! - Key material arrives base64 encoded and is decoded exactly once, here.
//! - Decoded keys go straight into `BridgeConfig`; nothing else keeps a copy.

use crate::recorder::{Jitter, RecorderSettings};
use ab_03_report_query::{DEFAULT_REPORT_ADDR, DEFAULT_TIMEOUT};
use ab_04_bit_channel::QueryMode;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use shared_types::{BridgeConfig, ConfigError, KeyLayout, KeyTemplateParams, LookBack};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Runtime configuration errors.
#[derive(Debug, Error)]
pub enum RuntimeConfigError {
    /// A key was not valid base64
    #[error("{name} is not valid base64: {source}")]
    Base64 {
        name: &'static str,
        #[source]
        source: base64::DecodeError,
    },

    /// The decoded keys were rejected
    #[error(transparent)]
    Bridge(#[from] ConfigError),

    /// The report provider address was empty
    #[error("report address must not be empty")]
    EmptyReportAddr,

    /// The query window was zero days
    #[error("look-back window must be at least one day")]
    ZeroLookBack,

    /// The bit spread tolerance was zero
    #[error("maximum bit report spread must be positive")]
    ZeroBitSpread,
}

/// Decode one base64 key argument.
pub fn decode_key(name: &'static str, encoded: &str) -> Result<Vec<u8>, RuntimeConfigError> {
    STANDARD
        .decode(encoded.trim())
        .map_err(|source| RuntimeConfigError::Base64 { name, source })
}

/// Base64 key material as supplied on the command line or environment.
#[derive(Clone, Default)]
pub struct KeyMaterial {
    pub location_private_key: String,
    pub location_advertisement_key: String,
    pub data_prefix: String,
    pub data_modem: String,
    pub layout: KeyLayout,
    pub max_attempts: u32,
}

impl KeyMaterial {
    /// Decode and validate into the immutable bridge configuration.
    pub fn to_bridge_config(&self) -> Result<BridgeConfig, RuntimeConfigError> {
        let template = KeyTemplateParams::new(
            self.layout,
            &decode_key("data prefix", &self.data_prefix)?,
            &decode_key("data modem id", &self.data_modem)?,
        )?
        .with_max_attempts(self.max_attempts);

        Ok(BridgeConfig::new(
            &decode_key("location private key", &self.location_private_key)?,
            &decode_key("location advertisement key", &self.location_advertisement_key)?,
            template,
        )?)
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("location_private_key", &"<redacted>")
            .field("location_advertisement_key", &self.location_advertisement_key)
            .field("data_prefix", &self.data_prefix)
            .field("data_modem", &self.data_modem)
            .field("layout", &self.layout)
            .field("max_attempts", &self.max_attempts)
            .finish()
    }
}

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Report provider endpoint.
    pub report_addr: String,
    /// Per-request timeout of the HTTP provider.
    pub request_timeout: Duration,
    /// Where the recorder keeps its history.
    pub record_file: PathBuf,
    /// Query window in days.
    pub max_days: u32,
    /// Largest tolerated spread of the bit reports behind one byte.
    pub max_bit_spread: Duration,
    /// How the bit channel sends its lookups.
    pub query_mode: QueryMode,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            report_addr: DEFAULT_REPORT_ADDR.to_string(),
            request_timeout: DEFAULT_TIMEOUT,
            record_file: PathBuf::from("air-bridge-records.json"),
            max_days: 2,
            max_bit_spread: Duration::from_secs(60 * 60),
            query_mode: QueryMode::Batched,
        }
    }
}

impl RuntimeConfig {
    pub fn validate(&self) -> Result<(), RuntimeConfigError> {
        if self.report_addr.trim().is_empty() {
            return Err(RuntimeConfigError::EmptyReportAddr);
        }
        if self.max_days == 0 {
            return Err(RuntimeConfigError::ZeroLookBack);
        }
        if self.max_bit_spread.is_zero() {
            return Err(RuntimeConfigError::ZeroBitSpread);
        }
        Ok(())
    }

    pub fn look_back(&self) -> LookBack {
        LookBack::days(self.max_days)
    }

    pub fn recorder_settings(&self) -> RecorderSettings {
        RecorderSettings {
            look_back: self.look_back(),
            max_bit_spread: self.max_bit_spread,
            round_delay: Jitter::between_rounds(),
        }
    }
}
