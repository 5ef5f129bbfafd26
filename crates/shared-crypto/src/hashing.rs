//! # Lookup Hashing
//!
//! The report provider indexes reports by `base64(SHA-256(advertisement key))`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use sha2::{Digest, Sha256};
use shared_types::LookupId;

/// SHA-256 output (256-bit).
pub type Hash = [u8; 32];

/// Hash data with SHA-256 (one-shot).
pub fn sha256(data: &[u8]) -> Hash {
    Sha256::digest(data).into()
}

/// Derive the lookup id of an advertisement key.
pub fn lookup_id(advertisement_key: &[u8]) -> LookupId {
    LookupId::from_encoded(STANDARD.encode(sha256(advertisement_key)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vector() {
        assert_eq!(
            hex::encode(sha256(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_lookup_id_is_standard_base64_of_digest() {
        let id = lookup_id(b"abc");
        assert_eq!(id.as_str(), "ungWv48Bz+pBQUDeXa4iI7ADYaOWF3qctBD/YfIAFa0=");
    }

    #[test]
    fn test_lookup_id_is_deterministic() {
        assert_eq!(lookup_id(&[7u8; 28]), lookup_id(&[7u8; 28]));
        assert_ne!(lookup_id(&[7u8; 28]), lookup_id(&[8u8; 28]));
    }
}
