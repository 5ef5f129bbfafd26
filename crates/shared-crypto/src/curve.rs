//! # NIST P-224 Point Handling
//!
//! Parsing and key agreement on the curve used by offline-finding beacons.
//!
//! ## Encodings
//!
//! - Advertisement keys are the bare 28-byte x coordinate. The y parity is not
//!   transmitted, so decompression assumes the even root (`0x02` tag).
//! - Ephemeral keys inside report payloads are 57-byte uncompressed SEC1 points.

use crate::CryptoError;
use p224::ecdh::diffie_hellman;
use p224::elliptic_curve::sec1::ToEncodedPoint;
use p224::{PublicKey, SecretKey};

/// Length of a bare x coordinate / advertisement key.
pub const COMPRESSED_X_LEN: usize = 28;

/// Length of an uncompressed SEC1 point (`0x04 || X || Y`).
pub const UNCOMPRESSED_POINT_LEN: usize = 57;

const EVEN_Y_TAG: u8 = 0x02;
const UNCOMPRESSED_TAG: u8 = 0x04;

/// Parse a big-endian private scalar.
///
/// # Errors
///
/// Returns `CryptoError::InvalidPrivateKey` for a zero or out-of-range scalar.
pub fn parse_private_key(bytes: &[u8]) -> Result<SecretKey, CryptoError> {
    SecretKey::from_slice(bytes).map_err(|_| CryptoError::InvalidPrivateKey)
}

/// Parse a 57-byte uncompressed point and check it lies on the curve.
///
/// # Errors
///
/// - `CryptoError::InvalidLength` if the slice is not 57 bytes
/// - `CryptoError::InvalidPublicKey` if the tag is wrong or the point is off-curve
pub fn parse_uncompressed_point(bytes: &[u8]) -> Result<PublicKey, CryptoError> {
    if bytes.len() != UNCOMPRESSED_POINT_LEN {
        return Err(CryptoError::InvalidLength {
            what: "uncompressed point",
            expected: UNCOMPRESSED_POINT_LEN,
            actual: bytes.len(),
        });
    }
    if bytes[0] != UNCOMPRESSED_TAG {
        return Err(CryptoError::InvalidPublicKey(format!(
            "expected uncompressed tag 0x04, got {:#04x}",
            bytes[0]
        )));
    }
    PublicKey::from_sec1_bytes(bytes)
        .map_err(|_| CryptoError::InvalidPublicKey("point is not on P-224".to_string()))
}

/// ECDH: multiply `public` by the scalar of `secret` and return the x coordinate.
///
/// The result is always the fixed-width 28-byte field encoding.
pub fn shared_secret_x(secret: &SecretKey, public: &PublicKey) -> [u8; COMPRESSED_X_LEN] {
    let shared = diffie_hellman(secret.to_nonzero_scalar(), public.as_affine());
    let mut x = [0u8; COMPRESSED_X_LEN];
    x.copy_from_slice(shared.raw_secret_bytes());
    x
}

/// Decompress a bare x coordinate with the even-y sign byte.
///
/// Returns `None` when no curve point has this x coordinate (or x >= p).
pub fn decompress_advertisement_key(x: &[u8]) -> Option<PublicKey> {
    if x.len() != COMPRESSED_X_LEN {
        return None;
    }
    let mut encoded = [0u8; COMPRESSED_X_LEN + 1];
    encoded[0] = EVEN_Y_TAG;
    encoded[1..].copy_from_slice(x);
    PublicKey::from_sec1_bytes(&encoded).ok()
}

/// Whether `x` is the x coordinate of a point on P-224.
///
/// Pure: the same input always yields the same answer.
pub fn is_valid_advertisement_key(x: &[u8]) -> bool {
    decompress_advertisement_key(x).is_some()
}

/// The advertisement key (bare x coordinate) belonging to `secret`.
pub fn advertisement_key_of(secret: &SecretKey) -> [u8; COMPRESSED_X_LEN] {
    let point = secret.public_key().to_encoded_point(true);
    let mut x = [0u8; COMPRESSED_X_LEN];
    x.copy_from_slice(&point.as_bytes()[1..]);
    x
}

/// The uncompressed SEC1 encoding of the public key belonging to `secret`.
pub fn uncompressed_point_of(secret: &SecretKey) -> [u8; UNCOMPRESSED_POINT_LEN] {
    let point = secret.public_key().to_encoded_point(false);
    let mut out = [0u8; UNCOMPRESSED_POINT_LEN];
    out.copy_from_slice(point.as_bytes());
    out
}
