//! # Integration Scenarios
//!
//! Each flow drives the public APIs of several subsystems against a
//! `SimulatedBeacon`, with no network involved.

pub mod bit_channel_flow;
pub mod location_flow;
pub mod recorder_flow;
