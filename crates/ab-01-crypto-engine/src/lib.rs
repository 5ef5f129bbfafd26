//! # Crypto Engine Subsystem (AB-01)
//!
//! Decrypts one crowd-sourced location report into a location fix.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): payload layout and the decryption pipeline, no I/O
//! - **Ports Layer** (`ports/`): the `LocationDecryptionApi` inbound port
//! - **Service Layer** (`service.rs`): binds the configured private key to the domain
//!
//! ## Pipeline
//!
//! ```text
//! payload ──► header (seen-at, confidence)          cleartext
//!        └─► ephemeral point ──► ECDH(x) ──► KDF ──► AES-128-GCM open ──► lat/lon/accuracy
//! ```
//!
//! ## Failure Model
//!
//! A small fraction of genuine reports fail to decrypt. `DecryptError` is a
//! per-report condition; only "every report in a batch failed" indicates a
//! wrong key, and that judgement belongs to the caller.

pub mod domain;
pub mod ports;
pub mod service;

#[cfg(any(test, feature = "test-utils"))]
pub mod fixtures;

// Re-export public API
pub use domain::decrypt::decrypt_report;
pub use domain::errors::DecryptError;
pub use domain::payload::{LocationPlaintext, ReportPayload, MIN_PAYLOAD_LEN};
pub use ports::inbound::LocationDecryptionApi;
pub use service::CryptoEngine;
