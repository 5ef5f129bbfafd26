//! # Bit Channel Errors

use ab_02_key_encoder::KeyEncoderError;
use ab_03_report_query::QueryError;
use shared_types::{Classify, DataByte, ErrorKind, LookupId};
use std::time::Duration;
use thiserror::Error;

/// Errors from resolving one data byte.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChannelError {
    /// No valid key within the attempt bound
    #[error("Key derivation failed: {0}")]
    KeyDerivation(#[from] KeyEncoderError),

    /// Bit indices of the byte overflow `u32`
    #[error("Byte index {byte_index} of message {message_id} is out of range")]
    ByteIndexOutOfRange { message_id: u32, byte_index: u32 },

    /// Report provider failure
    #[error("Report query failed: {0}")]
    Query(#[from] QueryError),

    /// Neither the set nor the clear key of a bit has been reported yet
    #[error(
        "No report for message {message_id} byte {byte_index} bit {bit_index} \
         (true id {true_id}, false id {false_id})"
    )]
    NoReport {
        message_id: u32,
        byte_index: u32,
        bit_index: u32,
        true_id: LookupId,
        false_id: LookupId,
    },

    /// Bit reports are too far apart in time to belong to one transmission
    #[error(
        "Stale byte {byte_index} of message {message_id}: value {value:#04x} spread {spread:?} exceeds {max_spread:?}"
    )]
    StaleData {
        message_id: u32,
        byte_index: u32,
        value: u8,
        spread: Duration,
        max_spread: Duration,
        /// The assembled byte. Advisory only; never persist it.
        byte: Box<DataByte>,
    },
}

impl Classify for ChannelError {
    fn kind(&self) -> ErrorKind {
        match self {
            ChannelError::KeyDerivation(_) | ChannelError::ByteIndexOutOfRange { .. } => {
                ErrorKind::Configuration
            }
            ChannelError::Query(_) => ErrorKind::Transport,
            ChannelError::NoReport { .. } => ErrorKind::NoReport,
            ChannelError::StaleData { .. } => ErrorKind::StaleData,
        }
    }
}

impl ChannelError {
    /// The untrusted byte carried by a `StaleData` error.
    pub fn stale_byte(&self) -> Option<&DataByte> {
        match self {
            ChannelError::StaleData { byte, .. } => Some(byte),
            _ => None,
        }
    }
}
