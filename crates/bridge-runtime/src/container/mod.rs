//! # Subsystem Container
//!
//! Builds the bit channel and the location channel over one shared report
//! provider.
//!
//! ## Wiring
//!
//! ```text
//! BridgeConfig ──► KeyEncoder ──┐
//!                               ├─► BitChannel      (QueryMode, Pacer)
//! provider ──► ReportQuery ─────┤
//!                               ├─► LocationChannel
//! BridgeConfig ──► CryptoEngine ┘
//! ```

pub mod config;

pub use config::{decode_key, KeyMaterial, RuntimeConfig, RuntimeConfigError};

use crate::pacing::RandomizedPacer;
use ab_01_crypto_engine::{CryptoEngine, DecryptError};
use ab_02_key_encoder::KeyEncoder;
use ab_03_report_query::{HttpReportProvider, QueryError, ReportProvider, ReportQuery};
use ab_04_bit_channel::{BitChannel, NoPacing, Pacer, QueryMode};
use ab_05_location_channel::LocationChannel;
use shared_types::BridgeConfig;
use std::sync::Arc;
use tracing::info;

/// Bit channel over a shared provider.
pub type DataChannel<P> = BitChannel<KeyEncoder, ReportQuery<Arc<P>>>;

/// Location channel over a shared provider.
pub type LocationTrail<P> = LocationChannel<CryptoEngine, ReportQuery<Arc<P>>>;

/// Pacer matching a query mode: randomized pauses for per-id queries.
pub fn pacer_for(mode: QueryMode) -> Arc<dyn Pacer> {
    match mode {
        QueryMode::Batched => Arc::new(NoPacing),
        QueryMode::PerId => Arc::new(RandomizedPacer::default()),
    }
}

/// HTTP provider for the configured report address.
pub fn http_provider(config: &RuntimeConfig) -> Result<Arc<HttpReportProvider>, QueryError> {
    Ok(Arc::new(HttpReportProvider::with_timeout(
        config.report_addr.clone(),
        config.request_timeout,
    )?))
}

/// The assembled subsystems.
pub struct BridgeServices<P: ReportProvider + 'static> {
    pub channel: DataChannel<P>,
    pub location: LocationTrail<P>,
}

impl<P: ReportProvider + 'static> BridgeServices<P> {
    /// Wire both channels to `provider`.
    ///
    /// # Errors
    ///
    /// `DecryptError::InvalidPrivateKey` if the location key is not a valid scalar.
    pub fn new(
        config: &BridgeConfig,
        provider: Arc<P>,
        mode: QueryMode,
        pacer: Arc<dyn Pacer>,
    ) -> Result<Self, DecryptError> {
        let channel = BitChannel::new(
            KeyEncoder::from_config(config),
            ReportQuery::new(provider.clone()),
        )
        .with_mode(mode, pacer);

        let location = LocationChannel::new(
            CryptoEngine::from_config(config)?,
            ReportQuery::new(provider),
            &config.location_advertisement_key,
        );

        info!(
            "[runtime] subsystems ready: layout {}, query mode {}, location id {}",
            config.template.layout,
            mode,
            location.lookup_id()
        );
        Ok(Self { channel, location })
    }
}
