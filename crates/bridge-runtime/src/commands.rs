//! # Commands
//!
//! Entry points behind each subcommand. Results go to stdout as JSON lines,
//! logs go to stderr. `record` prints the Prometheus text exposition on
//! shutdown.

use crate::container::{
    decode_key, http_provider, pacer_for, BridgeServices, KeyMaterial, RuntimeConfig,
};
use crate::recorder::{Recorder, RecordStore};
use ab_01_crypto_engine::{CryptoEngine, LocationDecryptionApi};
use ab_04_bit_channel::BitChannelApi;
use ab_05_location_channel::LocationHistoryApi;
use anyhow::{Context, Result};
use bridge_telemetry::encode_metrics;
use serde::Serialize;
use shared_types::{DecryptedLocation, LocationPrivateKey};
use tokio::sync::watch;
use tracing::info;

/// One data byte as printed by `read`.
#[derive(Debug, Serialize)]
pub struct ByteLine {
    pub message: u32,
    pub byte: u32,
    pub value: u8,
    pub report_time: chrono::DateTime<chrono::Utc>,
    pub spread_secs: u64,
}

fn connect(
    keys: &KeyMaterial,
    config: &RuntimeConfig,
) -> Result<BridgeServices<ab_03_report_query::HttpReportProvider>> {
    config.validate()?;
    let bridge = keys.to_bridge_config()?;
    let provider = http_provider(config)?;
    Ok(BridgeServices::new(
        &bridge,
        provider,
        config.query_mode,
        pacer_for(config.query_mode),
    )?)
}

/// Run the recorder until `shutdown` fires, then dump the metrics it recorded.
pub async fn record(
    keys: &KeyMaterial,
    config: &RuntimeConfig,
    shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let services = connect(keys, config)?;
    let store = RecordStore::open(&config.record_file)?;
    info!(
        "[runtime] recording to {} ({} records loaded)",
        store.path().display(),
        store.records().len()
    );

    let mut recorder = Recorder::new(
        services.channel,
        services.location,
        store,
        config.recorder_settings(),
    );
    recorder.run(shutdown).await?;

    print!("{}", encode_metrics()?);
    Ok(())
}

/// Fetch and print the location trail.
pub async fn locate(keys: &KeyMaterial, config: &RuntimeConfig) -> Result<Vec<DecryptedLocation>> {
    let services = connect(keys, config)?;
    let locations = services.location.fetch_history(config.look_back()).await?;
    for location in &locations {
        println!("{}", serde_json::to_string(location)?);
    }
    Ok(locations)
}

/// Resolve and print `len` bytes of message `message_id`.
pub async fn read(
    keys: &KeyMaterial,
    config: &RuntimeConfig,
    message_id: u32,
    len: u32,
) -> Result<Vec<u8>> {
    let services = connect(keys, config)?;
    let bytes = services
        .channel
        .resolve_bytes(message_id, len, config.look_back(), config.max_bit_spread)
        .await
        .with_context(|| format!("reading message {message_id}"))?;

    for (byte_index, byte) in (0u32..).zip(&bytes) {
        let line = ByteLine {
            message: message_id,
            byte: byte_index,
            value: byte.value,
            report_time: byte.report_time,
            spread_secs: byte.spread.as_secs(),
        };
        println!("{}", serde_json::to_string(&line)?);
    }
    Ok(bytes.iter().map(|b| b.value).collect())
}

/// Decrypt one base64 report payload with a base64 private key.
pub fn decrypt(private_key: &str, payload: &str) -> Result<DecryptedLocation> {
    let private_key = LocationPrivateKey::from_slice(&decode_key("private key", private_key)?)?;
    let payload = decode_key("encrypted payload", payload)?;
    let location = CryptoEngine::new(&private_key)?.decrypt(&payload)?;
    println!("{}", serde_json::to_string(&location)?);
    Ok(location)
}
