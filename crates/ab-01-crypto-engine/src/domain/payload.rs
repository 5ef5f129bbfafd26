//! # Report Payload Layout
//!
//! Offsets of the sealed part are counted from the end of the buffer, because
//! some reports carry an extra byte after the cleartext header.
//!
//! ```text
//! [0..4)        seen-at, u32 BE seconds since 2001-01-01T00:00:00Z   (cleartext)
//! [4]           confidence                                            (cleartext)
//! [len-83..-26) ephemeral public key, uncompressed P-224 (57 bytes)
//! [len-26..-16) ciphertext (10 bytes)
//! [len-16..)    GCM tag (16 bytes)
//! ```

use super::errors::DecryptError;
use shared_crypto::{TAG_LEN, UNCOMPRESSED_POINT_LEN};

const HEADER_LEN: usize = 5;
const CIPHERTEXT_LEN: usize = 10;
const SEALED_TAIL_LEN: usize = UNCOMPRESSED_POINT_LEN + CIPHERTEXT_LEN + TAG_LEN;

/// Shortest payload whose header and sealed tail do not overlap.
pub const MIN_PAYLOAD_LEN: usize = HEADER_LEN + SEALED_TAIL_LEN;

/// Plaintext scale: degrees are transmitted as integer multiples of 1e-7.
const DEGREE_SCALE: f64 = 10_000_000.0;

/// A report payload split into its sections. Borrows the original buffer.
#[derive(Debug, Clone, Copy)]
pub struct ReportPayload<'a> {
    /// Device timestamp, seconds since 2001-01-01T00:00:00Z.
    pub seen_at: u32,
    /// Raw confidence byte.
    pub confidence: u8,
    /// 57-byte uncompressed ephemeral point.
    pub ephemeral_key: &'a [u8],
    /// Ciphertext immediately followed by the tag.
    pub sealed: &'a [u8],
}

impl<'a> ReportPayload<'a> {
    /// Split a payload into sections without any cryptographic checks.
    ///
    /// # Errors
    ///
    /// `DecryptError::Truncated` if the buffer is shorter than `MIN_PAYLOAD_LEN`.
    pub fn parse(bytes: &'a [u8]) -> Result<Self, DecryptError> {
        let len = bytes.len();
        if len < MIN_PAYLOAD_LEN {
            return Err(DecryptError::Truncated {
                len,
                min: MIN_PAYLOAD_LEN,
            });
        }

        let seen_at = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let tail = len - SEALED_TAIL_LEN;
        let sealed_start = len - CIPHERTEXT_LEN - TAG_LEN;

        Ok(Self {
            seen_at,
            confidence: bytes[4],
            ephemeral_key: &bytes[tail..sealed_start],
            sealed: &bytes[sealed_start..],
        })
    }

    /// The 10 ciphertext bytes.
    pub fn ciphertext(&self) -> &'a [u8] {
        &self.sealed[..CIPHERTEXT_LEN]
    }

    /// The 16 tag bytes.
    pub fn tag(&self) -> &'a [u8] {
        &self.sealed[CIPHERTEXT_LEN..]
    }
}

/// Decoded plaintext of a location report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationPlaintext {
    /// Latitude in units of 1e-7 degrees.
    pub latitude_e7: i32,
    /// Longitude in units of 1e-7 degrees.
    pub longitude_e7: i32,
    /// Accuracy in metres.
    pub accuracy_metres: u8,
}

impl LocationPlaintext {
    /// Bytes of plaintext consumed by the decoder.
    pub const LEN: usize = 9;

    /// Decode `[lat:4 BE][lon:4 BE][accuracy:1]`. Trailing bytes are ignored.
    pub fn decode(plaintext: &[u8]) -> Option<Self> {
        if plaintext.len() < Self::LEN {
            return None;
        }
        Some(Self {
            latitude_e7: i32::from_be_bytes([plaintext[0], plaintext[1], plaintext[2], plaintext[3]]),
            longitude_e7: i32::from_be_bytes([plaintext[4], plaintext[5], plaintext[6], plaintext[7]]),
            accuracy_metres: plaintext[8],
        })
    }

    /// Latitude in decimal degrees.
    pub fn latitude(&self) -> f64 {
        f64::from(self.latitude_e7) / DEGREE_SCALE
    }

    /// Longitude in decimal degrees.
    pub fn longitude(&self) -> f64 {
        f64::from(self.longitude_e7) / DEGREE_SCALE
    }
}
