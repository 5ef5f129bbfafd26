//! # Inbound Ports (Driving Ports / API)

use crate::domain::entities::{BitLookup, ValidKey};
use crate::domain::errors::KeyEncoderError;
use shared_types::{AdvertisementKey, LookupId};

/// Key derivation for the data-bit channel.
///
/// Every method is a pure function of the configured template and its
/// arguments. Implementations must be `Send + Sync`.
pub trait KeyEncoderApi: Send + Sync {
    /// The raw 28-byte candidate for one bit and attempt.
    fn construct(&self, message_id: u32, bit_index: u32, bit: bool, attempt: u32)
        -> AdvertisementKey;

    /// Whether `candidate` decompresses to a curve point.
    fn is_valid_point(&self, candidate: &[u8]) -> bool;

    /// The first valid candidate within the configured attempt bound.
    fn find_valid(
        &self,
        message_id: u32,
        bit_index: u32,
        bit: bool,
    ) -> Result<ValidKey, KeyEncoderError>;

    /// SHA-256 of `key`, standard base64.
    fn hash(&self, key: &[u8]) -> LookupId;

    /// Lookup ids for both values of one bit.
    fn lookup_pair(&self, message_id: u32, bit_index: u32) -> Result<BitLookup, KeyEncoderError>;
}
