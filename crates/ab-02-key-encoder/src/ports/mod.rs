//! # Ports Layer
//!
//! - **Inbound (Driving)**: `KeyEncoderApi`, used by the bit channel

pub mod inbound;
