//! # Inbound Ports (Driving Ports / API)

use crate::domain::errors::ChannelError;
use async_trait::async_trait;
use shared_types::{DataByte, LookBack};
use std::time::Duration;

/// Data byte reader for beacon messages.
#[async_trait]
pub trait BitChannelApi: Send + Sync {
    /// Resolve byte `byte_index` of message `message_id`.
    ///
    /// Fails with `ChannelError::StaleData` when the eight contributing
    /// reports span more than `max_spread`, even if every bit resolved.
    async fn resolve_byte(
        &self,
        message_id: u32,
        byte_index: u32,
        look_back: LookBack,
        max_spread: Duration,
    ) -> Result<DataByte, ChannelError>;

    /// Resolve `len` consecutive bytes starting at byte 0. Stops at the first error.
    async fn resolve_bytes(
        &self,
        message_id: u32,
        len: u32,
        look_back: LookBack,
        max_spread: Duration,
    ) -> Result<Vec<DataByte>, ChannelError> {
        let mut bytes = Vec::with_capacity(len as usize);
        for byte_index in 0..len {
            bytes.push(
                self.resolve_byte(message_id, byte_index, look_back, max_spread)
                    .await?,
            );
        }
        Ok(bytes)
    }
}
