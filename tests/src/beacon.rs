//! # Simulated Beacon
//!
//! Stands in for the beacon and the crowd of finder devices: it publishes the
//! reports a real beacon would cause, straight into an in-memory provider.

use ab_01_crypto_engine::fixtures::{seal_report, LocationFix};
use ab_02_key_encoder::{KeyEncoder, KeyEncoderApi};
use ab_03_report_query::InMemoryReportProvider;
use ab_04_bit_channel::{bit_indices, NoPacing, QueryMode};
use bridge_runtime::BridgeServices;
use chrono::Utc;
use p224::SecretKey;
use shared_crypto::{advertisement_key_of, lookup_id};
use shared_types::{
    BridgeConfig, KeyLayout, KeyTemplateParams, LookupId, Report, APPLE_EPOCH_OFFSET_SECS,
};
use std::sync::Arc;

/// Magic prefix used by the simulated firmware.
pub const MAGIC: [u8; 2] = [0xBA, 0xBE];

/// Modem id of the simulated beacon.
pub const MODEM_ID: [u8; 4] = [0xDE, 0xAD, 0xBE, 0xEF];

pub const MINUTE_MS: i64 = 60_000;

/// Current time in Unix milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// A beacon and the provider its reports land in.
pub struct SimulatedBeacon {
    pub provider: Arc<InMemoryReportProvider>,
    config: BridgeConfig,
    encoder: KeyEncoder,
    location_key: SecretKey,
}

impl SimulatedBeacon {
    pub fn new(layout: KeyLayout) -> Self {
        let location_key = SecretKey::random(&mut rand::thread_rng());
        let template = KeyTemplateParams::new(layout, &MAGIC, &MODEM_ID)
            .expect("fixed template parameters are valid");
        let config = BridgeConfig::new(
            &location_key.to_bytes(),
            &advertisement_key_of(&location_key),
            template,
        )
        .expect("generated keys are valid");

        Self {
            provider: Arc::new(InMemoryReportProvider::new()),
            encoder: KeyEncoder::from_config(&config),
            config,
            location_key,
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Lookup id of the beacon's location advertisement key.
    pub fn location_id(&self) -> LookupId {
        lookup_id(&self.config.location_advertisement_key)
    }

    /// Subsystems wired to this beacon's provider.
    pub fn services(&self, mode: QueryMode) -> BridgeServices<InMemoryReportProvider> {
        BridgeServices::new(&self.config, self.provider.clone(), mode, Arc::new(NoPacing))
            .expect("generated private key is valid")
    }

    /// Publish the reports for one byte: bit `i` (MSB first) heard at `published[i]`.
    pub async fn transmit_byte(
        &self,
        message_id: u32,
        byte_index: u32,
        value: u8,
        published: [i64; 8],
    ) {
        let indices = bit_indices(byte_index).expect("byte index in range");
        for (position, bit_index) in indices.enumerate() {
            let bit = value & (0x80 >> position) != 0;
            let pair = self
                .encoder
                .lookup_pair(message_id, bit_index)
                .expect("template yields valid keys");
            self.publish(pair.id_for(bit).clone(), vec![0xA5; 88], published[position])
                .await;
        }
    }

    /// Publish the opposite guess for one bit, e.g. after the beacon changed value.
    pub async fn transmit_bit(
        &self,
        message_id: u32,
        bit_index: u32,
        bit: bool,
        published_at_millis: i64,
    ) {
        let pair = self
            .encoder
            .lookup_pair(message_id, bit_index)
            .expect("template yields valid keys");
        self.publish(pair.id_for(bit).clone(), vec![0xA5; 88], published_at_millis)
            .await;
    }

    /// Publish a location report sealed to the beacon's key.
    pub async fn report_location(&self, fix: &LocationFix, published_at_millis: i64) {
        let ephemeral = SecretKey::random(&mut rand::thread_rng());
        let payload = seal_report(&self.location_key.public_key(), &ephemeral, fix)
            .expect("sealing a fix succeeds");
        self.publish(self.location_id(), payload, published_at_millis)
            .await;
    }

    /// Publish a report under the beacon's id that its key cannot open.
    pub async fn report_undecryptable(&self, fix: &LocationFix, published_at_millis: i64) {
        let stranger = SecretKey::random(&mut rand::thread_rng());
        let ephemeral = SecretKey::random(&mut rand::thread_rng());
        let payload = seal_report(&stranger.public_key(), &ephemeral, fix)
            .expect("sealing a fix succeeds");
        self.publish(self.location_id(), payload, published_at_millis)
            .await;
    }

    async fn publish(&self, lookup_id: LookupId, payload: Vec<u8>, published_at_millis: i64) {
        self.provider
            .publish(Report {
                lookup_id,
                payload,
                published_at_millis,
            })
            .await;
    }
}

/// A fix near Berlin `minutes_ago` before now, in device time.
pub fn fix_minutes_ago(minutes_ago: u32, accuracy_metres: u8) -> LocationFix {
    let seen_at = Utc::now().timestamp() - APPLE_EPOCH_OFFSET_SECS - i64::from(minutes_ago) * 60;
    LocationFix {
        latitude: 52.52 + f64::from(minutes_ago) * 1e-4,
        longitude: 13.405,
        accuracy_metres,
        confidence: 2,
        seen_at: u32::try_from(seen_at).unwrap_or_default(),
    }
}
