//! # Report Fixtures
//!
//! Seal a location the way a finder device does, producing payloads that
//! `decrypt_report` accepts. Only compiled for tests and the `test-utils` feature.

use p224::{PublicKey, SecretKey};
use shared_crypto::{derive_report_key, seal, shared_secret_x, uncompressed_point_of, CryptoError};

/// Plain location fix to be sealed into a report.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LocationFix {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_metres: u8,
    pub confidence: u8,
    /// Seconds since 2001-01-01T00:00:00Z.
    pub seen_at: u32,
}

impl LocationFix {
    fn plaintext(&self) -> [u8; 10] {
        let mut out = [0u8; 10];
        out[..4].copy_from_slice(&to_e7(self.latitude).to_be_bytes());
        out[4..8].copy_from_slice(&to_e7(self.longitude).to_be_bytes());
        out[8] = self.accuracy_metres;
        out
    }
}

fn to_e7(degrees: f64) -> i32 {
    (degrees * 10_000_000.0).round() as i32
}

/// Build an 88-byte report payload addressed to `recipient`.
pub fn seal_report(
    recipient: &PublicKey,
    ephemeral: &SecretKey,
    fix: &LocationFix,
) -> Result<Vec<u8>, CryptoError> {
    let ephemeral_point = uncompressed_point_of(ephemeral);
    let shared_x = shared_secret_x(ephemeral, recipient);
    let key = derive_report_key(&shared_x, &ephemeral_point);
    let sealed = seal(&key, &fix.plaintext())?;

    let mut payload = Vec::with_capacity(5 + ephemeral_point.len() + sealed.len());
    payload.extend_from_slice(&fix.seen_at.to_be_bytes());
    payload.push(fix.confidence);
    payload.extend_from_slice(&ephemeral_point);
    payload.extend_from_slice(&sealed);
    Ok(payload)
}
