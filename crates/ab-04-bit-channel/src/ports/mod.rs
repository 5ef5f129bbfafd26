//! # Ports Layer
//!
//! - **Inbound (Driving)**: `BitChannelApi`
//! - **Outbound (Driven)**: `Pacer`, the delay between per-id queries

pub mod inbound;
pub mod outbound;
