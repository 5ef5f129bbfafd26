//! # Key Encoder Subsystem (AB-02)
//!
//! Maps one data bit to the advertisement key a beacon broadcasts for it, and
//! that key to the lookup id the report provider is queried with.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): key templates, the valid-point predicate and the bounded search
//! - **Ports Layer** (`ports/`): the `KeyEncoderApi` inbound port
//! - **Service Layer** (`service.rs`): `KeyEncoder`, bound to one `KeyTemplateParams`
//!
//! ## Key Search
//!
//! About half of all 28-byte strings are not the x coordinate of a P-224 point.
//! Every template reserves a 4-byte attempt counter; the beacon and this
//! encoder both take the first attempt whose candidate decompresses.
//!
//! ```text
//! attempt 0 ──► construct ──► on curve? ── no ──► attempt 1 ──► ...
//!                                 │
//!                                yes ──► ValidKey ──► SHA-256 ──► base64 ──► LookupId
//! ```

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::entities::{BitLookup, ValidKey};
pub use domain::errors::KeyEncoderError;
pub use domain::search::{find_valid, is_valid_point};
pub use domain::template::{template_for, IndexFirstTemplate, KeyTemplate, MessageFirstTemplate};
pub use ports::inbound::KeyEncoderApi;
pub use service::KeyEncoder;
