//! # Location Channel Subsystem (AB-05)
//!
//! Recovers the beacon's location trail from reports filed under its own
//! advertisement key.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): batch outcome and the wrong-key judgement
//! - **Ports Layer** (`ports/`): the `LocationHistoryApi` inbound port
//! - **Service Layer** (`service.rs`): `LocationChannel`, query then decrypt
//!
//! ## Failure Model
//!
//! Individual reports fail to decrypt at a low background rate and are
//! dropped. Only a batch in which every report fails is an error, since that
//! points at a wrong private key rather than noise.

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::batch::LocationBatch;
pub use domain::errors::LocationError;
pub use ports::inbound::LocationHistoryApi;
pub use service::LocationChannel;
