//! # Bit Channel Service
//!
//! Implements `BitChannelApi` on top of a key encoder and a report query.

use crate::domain::entities::{bit_indices, QueryMode, ResolvedBit};
use crate::domain::errors::ChannelError;
use crate::domain::resolve::{assemble, resolve_bit};
use crate::ports::inbound::BitChannelApi;
use crate::ports::outbound::{NoPacing, Pacer};
use ab_02_key_encoder::{BitLookup, KeyEncoderApi};
use ab_03_report_query::ReportQueryApi;
use async_trait::async_trait;
use shared_types::{DataByte, LookBack, LookupId, Report, BITS_PER_BYTE};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Bit channel service.
pub struct BitChannel<K: KeyEncoderApi, Q: ReportQueryApi> {
    encoder: K,
    query: Q,
    mode: QueryMode,
    pacer: Arc<dyn Pacer>,
}

impl<K: KeyEncoderApi, Q: ReportQueryApi> BitChannel<K, Q> {
    /// Create a channel that sends all 16 ids of a byte in one request.
    pub fn new(encoder: K, query: Q) -> Self {
        Self {
            encoder,
            query,
            mode: QueryMode::Batched,
            pacer: Arc::new(NoPacing),
        }
    }

    /// Switch query mode. `pacer` only takes effect in `QueryMode::PerId`.
    pub fn with_mode(mut self, mode: QueryMode, pacer: Arc<dyn Pacer>) -> Self {
        self.mode = mode;
        self.pacer = pacer;
        self
    }

    pub fn mode(&self) -> QueryMode {
        self.mode
    }

    fn lookups(
        &self,
        message_id: u32,
        byte_index: u32,
    ) -> Result<[BitLookup; BITS_PER_BYTE], ChannelError> {
        let indices = bit_indices(byte_index).ok_or(ChannelError::ByteIndexOutOfRange {
            message_id,
            byte_index,
        })?;

        let mut lookups: [BitLookup; BITS_PER_BYTE] = Default::default();
        for (slot, bit_index) in lookups.iter_mut().zip(indices) {
            *slot = self.encoder.lookup_pair(message_id, bit_index)?;
        }
        Ok(lookups)
    }

    async fn fetch(
        &self,
        lookups: &[BitLookup; BITS_PER_BYTE],
        look_back: LookBack,
    ) -> Result<HashMap<LookupId, Report>, ChannelError> {
        let ids: Vec<LookupId> = lookups
            .iter()
            .flat_map(|l| [l.true_id.clone(), l.false_id.clone()])
            .collect();

        match self.mode {
            QueryMode::Batched => Ok(self.query.fetch(&ids, look_back).await?),
            QueryMode::PerId => {
                let mut reports = HashMap::with_capacity(ids.len());
                for (i, id) in ids.iter().enumerate() {
                    if i > 0 {
                        self.pacer.pause().await;
                    }
                    if let Some(report) = self.query.fetch_one(id, look_back).await? {
                        reports.insert(id.clone(), report);
                    }
                }
                Ok(reports)
            }
        }
    }
}

#[async_trait]
impl<K: KeyEncoderApi, Q: ReportQueryApi> BitChannelApi for BitChannel<K, Q> {
    #[instrument(skip(self), fields(mode = %self.mode))]
    async fn resolve_byte(
        &self,
        message_id: u32,
        byte_index: u32,
        look_back: LookBack,
        max_spread: Duration,
    ) -> Result<DataByte, ChannelError> {
        let lookups = self.lookups(message_id, byte_index)?;
        let reports = self.fetch(&lookups, look_back).await?;

        let mut bits: [ResolvedBit; BITS_PER_BYTE] = Default::default();
        for (slot, lookup) in bits.iter_mut().zip(&lookups) {
            *slot = resolve_bit(reports.get(&lookup.true_id), reports.get(&lookup.false_id))
                .ok_or_else(|| ChannelError::NoReport {
                    message_id,
                    byte_index,
                    bit_index: lookup.bit_index,
                    true_id: lookup.true_id.clone(),
                    false_id: lookup.false_id.clone(),
                })?;
            debug!(
                "[ab-04] msg {} bit {} = {} (published {})",
                message_id,
                lookup.bit_index,
                u8::from(slot.value),
                slot.report.published_at_millis
            );
        }

        let byte = assemble(bits);
        if !byte.is_within(max_spread) {
            warn!(
                "[ab-04] msg {} byte {} = {:#04x} is stale: spread {:?} > {:?}",
                message_id, byte_index, byte.value, byte.spread, max_spread
            );
            return Err(ChannelError::StaleData {
                message_id,
                byte_index,
                value: byte.value,
                spread: byte.spread,
                max_spread,
                byte: Box::new(byte),
            });
        }

        info!(
            "[ab-04] msg {} byte {} = {:#04x} at {} (spread {:?})",
            message_id, byte_index, byte.value, byte.report_time, byte.spread
        );
        Ok(byte)
    }
}
