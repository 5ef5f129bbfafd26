//! # Report Decryption
//!
//! 1. Split the payload and read the cleartext header
//! 2. Parse the ephemeral point; reject off-curve keys
//! 3. ECDH with the location private key, keep the x coordinate
//! 4. Derive `aes_key || nonce` with the one-block SHA-256 KDF
//! 5. Open the AEAD and decode latitude, longitude and accuracy

use super::errors::DecryptError;
use super::payload::{LocationPlaintext, ReportPayload};
use p224::SecretKey;
use shared_crypto::{derive_report_key, open, parse_uncompressed_point, shared_secret_x};
use shared_types::{apple_epoch_to_utc, DecryptedLocation};

/// Decrypt one report payload with the location private key.
///
/// # Errors
///
/// - `DecryptError::Truncated` for payloads shorter than 88 bytes
/// - `DecryptError::InvalidEphemeralKey` if the embedded point is not on P-224
/// - `DecryptError::AuthenticationFailed` if the GCM tag does not verify
pub fn decrypt_report(
    payload: &[u8],
    private_key: &SecretKey,
) -> Result<DecryptedLocation, DecryptError> {
    let parsed = ReportPayload::parse(payload)?;

    let ephemeral = parse_uncompressed_point(parsed.ephemeral_key)
        .map_err(DecryptError::InvalidEphemeralKey)?;

    let shared_x = shared_secret_x(private_key, &ephemeral);
    let report_key = derive_report_key(&shared_x, parsed.ephemeral_key);

    let plaintext =
        open(&report_key, parsed.sealed).map_err(|_| DecryptError::AuthenticationFailed {
            payload_len: payload.len(),
        })?;

    let fix = LocationPlaintext::decode(&plaintext).ok_or(DecryptError::Truncated {
        len: plaintext.len(),
        min: LocationPlaintext::LEN,
    })?;

    Ok(DecryptedLocation {
        latitude: fix.latitude(),
        longitude: fix.longitude(),
        accuracy_metres: fix.accuracy_metres,
        confidence: parsed.confidence,
        timestamp: apple_epoch_to_utc(parsed.seen_at),
    })
}
