//! # Ports Layer
//!
//! - **Inbound (Driving)**: `ReportQueryApi`, used by the bit and location channels
//! - **Outbound (Driven)**: `ReportProvider`, the external report service

pub mod inbound;
pub mod outbound;
