//! # Report Key Derivation
//!
//! ANSI X9.63 KDF with SHA-256, truncated to a single output block:
//! `SHA-256(shared_x || 0x00000001 || ephemeral_point)`.

use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

const KDF_COUNTER: u32 = 1;

/// Symmetric material derived for one report.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ReportKey([u8; 32]);

impl ReportKey {
    /// First 16 bytes: AES-128 key.
    pub fn aes_key(&self) -> &[u8] {
        &self.0[..16]
    }

    /// Last 16 bytes: AEAD nonce.
    pub fn nonce(&self) -> &[u8] {
        &self.0[16..]
    }

    /// Get inner bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

/// Derive the per-report key from the ECDH x coordinate and the ephemeral point.
pub fn derive_report_key(shared_x: &[u8], ephemeral_point: &[u8]) -> ReportKey {
    let mut hasher = Sha256::new();
    hasher.update(shared_x);
    hasher.update(KDF_COUNTER.to_be_bytes());
    hasher.update(ephemeral_point);
    ReportKey(hasher.finalize().into())
}
