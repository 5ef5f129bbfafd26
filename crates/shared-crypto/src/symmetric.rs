//! # Symmetric Encryption
//!
//! AES-128-GCM with a 16-byte nonce and no associated data, the AEAD used by
//! offline-finding location reports.

use crate::kdf::ReportKey;
use crate::CryptoError;
use aes_gcm::aead::consts::U16;
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::aes::Aes128;
use aes_gcm::{AesGcm, Nonce};

/// Authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

type ReportCipher = AesGcm<Aes128, U16>;

fn cipher_for(key: &ReportKey) -> Result<ReportCipher, CryptoError> {
    ReportCipher::new_from_slice(key.aes_key()).map_err(|_| CryptoError::InvalidLength {
        what: "AES-128 key",
        expected: 16,
        actual: key.aes_key().len(),
    })
}

/// Decrypt and authenticate `ciphertext || tag`.
///
/// # Errors
///
/// Returns `CryptoError::AuthenticationFailed` if the tag does not verify.
pub fn open(key: &ReportKey, ciphertext_and_tag: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if ciphertext_and_tag.len() < TAG_LEN {
        return Err(CryptoError::InvalidLength {
            what: "ciphertext and tag",
            expected: TAG_LEN,
            actual: ciphertext_and_tag.len(),
        });
    }
    let cipher = cipher_for(key)?;
    cipher
        .decrypt(Nonce::<U16>::from_slice(key.nonce()), ciphertext_and_tag)
        .map_err(|_| CryptoError::AuthenticationFailed)
}

/// Encrypt `plaintext`, returning `ciphertext || tag`.
///
/// # Errors
///
/// Returns `CryptoError::EncryptionFailed` if encryption fails.
pub fn seal(key: &ReportKey, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let cipher = cipher_for(key)?;
    cipher
        .encrypt(Nonce::<U16>::from_slice(key.nonce()), plaintext)
        .map_err(|_| CryptoError::EncryptionFailed)
}
