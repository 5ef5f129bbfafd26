//! # Valid Key Search
//!
//! A pure predicate and an explicit bounded loop over it. Nothing is cached
//! between calls, so the search is reentrant.

use super::entities::ValidKey;
use super::errors::KeyEncoderError;
use super::template::KeyTemplate;
use shared_crypto::is_valid_advertisement_key;

/// Whether `candidate` is the x coordinate of a P-224 point (even-y decompression).
pub fn is_valid_point(candidate: &[u8]) -> bool {
    is_valid_advertisement_key(candidate)
}

/// The first attempt in `0..max_attempts` whose candidate is a valid point.
///
/// # Errors
///
/// `KeyEncoderError::NoValidKey` if the bound is exhausted.
pub fn find_valid(
    template: &dyn KeyTemplate,
    message_id: u32,
    bit_index: u32,
    bit: bool,
    max_attempts: u32,
) -> Result<ValidKey, KeyEncoderError> {
    (0..max_attempts)
        .map(|attempt| ValidKey {
            attempt,
            key: template.construct(message_id, bit_index, bit, attempt),
        })
        .find(|candidate| is_valid_point(&candidate.key))
        .ok_or(KeyEncoderError::NoValidKey {
            message_id,
            bit_index,
            bit,
            attempts: max_attempts,
        })
}
