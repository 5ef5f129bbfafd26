//! # Adapters
//!
//! Implementations of the `ReportProvider` outbound port.

pub mod http;
pub mod memory;
