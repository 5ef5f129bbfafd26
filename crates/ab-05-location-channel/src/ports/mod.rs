//! # Ports Layer
//!
//! - **Inbound (Driving)**: `LocationHistoryApi`
//!
//! Outbound dependencies are the inbound ports of ab-01 and ab-03.

pub mod inbound;
