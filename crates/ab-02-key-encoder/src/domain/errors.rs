//! # Key Encoder Errors

use shared_types::{Classify, ErrorKind};
use thiserror::Error;

/// Errors raised while deriving data-bit keys.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyEncoderError {
    /// Every attempt within the bound produced an off-curve candidate.
    ///
    /// Points at a firmware/layout mismatch, never at a transient condition.
    #[error(
        "No valid key for message {message_id}, bit {bit_index} = {bit} within {attempts} attempts"
    )]
    NoValidKey {
        message_id: u32,
        bit_index: u32,
        bit: bool,
        attempts: u32,
    },
}

impl Classify for KeyEncoderError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Configuration
    }
}
