//! # Ports Layer
//!
//! - **Inbound (Driving)**: `LocationDecryptionApi`, used by the location channel
//!
//! The engine performs no I/O, so there is no outbound port.

pub mod inbound;
