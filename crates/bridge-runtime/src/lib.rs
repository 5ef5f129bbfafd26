//! # Air-Bridge Runtime
//!
//! Wires the subsystems to a report provider and runs them: the long-running
//! recorder, plus one-shot commands for locating the beacon, reading a
//! message and decrypting a single report.
//!
//! ## Modules
//!
//! - `cli`: flags and environment fallbacks
//! - `container`: configuration and subsystem wiring
//! - `recorder`: polling rounds, sensor decoding and the record file
//! - `pacing`: randomized pauses between per-id queries
//! - `commands`: subcommand entry points

pub mod cli;
pub mod commands;
pub mod container;
pub mod pacing;
pub mod recorder;

pub use container::{BridgeServices, KeyMaterial, RuntimeConfig, RuntimeConfigError};
pub use pacing::RandomizedPacer;
pub use recorder::{Record, RecordStore, Recorder, RecorderSettings};
