//! # Shared Types Crate
//!
//! Value shapes, configuration and error classification shared by every
//! Air-Bridge subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `LookupId`, `Report`, `DecryptedLocation` and
//!   `DataByte` are defined once here and flow unchanged between subsystems.
//! - **Immutable Configuration**: `BridgeConfig` is built once at startup and
//!   handed to each component constructor; nothing mutates it afterwards.
//! - **Uniform Dispositions**: every subsystem error maps onto an `ErrorKind`
//!   so callers can decide between retry, drop and abort in one place.

pub mod config;
pub mod entities;
pub mod errors;

pub use config::*;
pub use entities::*;
pub use errors::*;
