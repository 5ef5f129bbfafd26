//! # Shared Crypto - Offline-Finding Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `curve` | NIST P-224 | Point parsing, decompression, ECDH |
//! | `kdf` | ANSI X9.63 (SHA-256, one block) | Report key derivation |
//! | `symmetric` | AES-128-GCM, 16-byte nonce | Report payload sealing |
//! | `hashing` | SHA-256 + base64 | Lookup ids |
//!
//! ## Notes
//!
//! - The AEAD nonce is the last 16 bytes of the derived key. GCM accepts it
//!   through the GHASH nonce path rather than the usual 12-byte fast path.
//! - The shared secret is always the full 28-byte x coordinate, never a
//!   trimmed big-integer encoding.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod curve;
pub mod errors;
pub mod hashing;
pub mod kdf;
pub mod symmetric;

// Re-exports
pub use curve::{
    advertisement_key_of, decompress_advertisement_key, is_valid_advertisement_key,
    parse_private_key, parse_uncompressed_point, shared_secret_x, uncompressed_point_of,
    COMPRESSED_X_LEN, UNCOMPRESSED_POINT_LEN,
};
pub use errors::CryptoError;
pub use hashing::{lookup_id, sha256};
pub use kdf::{derive_report_key, ReportKey};
pub use symmetric::{open, seal, TAG_LEN};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
