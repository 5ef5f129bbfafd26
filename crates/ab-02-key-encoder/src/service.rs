//! # Key Encoder Service
//!
//! Binds one `KeyTemplateParams` to the domain functions.

use crate::domain::entities::{BitLookup, ValidKey};
use crate::domain::errors::KeyEncoderError;
use crate::domain::search;
use crate::domain::template::{template_for, KeyTemplate};
use crate::ports::inbound::KeyEncoderApi;
use shared_crypto::lookup_id;
use shared_types::{AdvertisementKey, BridgeConfig, KeyTemplateParams, LookupId};
use tracing::{debug, error};

/// Derives data-bit keys for one firmware template.
pub struct KeyEncoder {
    template: Box<dyn KeyTemplate>,
    max_attempts: u32,
}

impl KeyEncoder {
    pub fn new(params: &KeyTemplateParams) -> Self {
        Self {
            template: template_for(params),
            max_attempts: params.max_attempts,
        }
    }

    pub fn from_config(config: &BridgeConfig) -> Self {
        Self::new(&config.template)
    }

    /// Attempt bound used by `find_valid`.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

impl KeyEncoderApi for KeyEncoder {
    fn construct(
        &self,
        message_id: u32,
        bit_index: u32,
        bit: bool,
        attempt: u32,
    ) -> AdvertisementKey {
        self.template.construct(message_id, bit_index, bit, attempt)
    }

    fn is_valid_point(&self, candidate: &[u8]) -> bool {
        search::is_valid_point(candidate)
    }

    fn find_valid(
        &self,
        message_id: u32,
        bit_index: u32,
        bit: bool,
    ) -> Result<ValidKey, KeyEncoderError> {
        let found = search::find_valid(
            self.template.as_ref(),
            message_id,
            bit_index,
            bit,
            self.max_attempts,
        );
        match &found {
            Ok(valid) => debug!(
                "[ab-02] msg {} bit {}={} valid at attempt {}",
                message_id, bit_index, bit, valid.attempt
            ),
            Err(e) => error!("[ab-02] {} (layout {})", e, self.template.layout()),
        }
        found
    }

    fn hash(&self, key: &[u8]) -> LookupId {
        lookup_id(key)
    }

    fn lookup_pair(&self, message_id: u32, bit_index: u32) -> Result<BitLookup, KeyEncoderError> {
        let set = self.find_valid(message_id, bit_index, true)?;
        let clear = self.find_valid(message_id, bit_index, false)?;
        Ok(BitLookup {
            message_id,
            bit_index,
            true_id: self.hash(&set.key),
            false_id: self.hash(&clear.key),
        })
    }
}
