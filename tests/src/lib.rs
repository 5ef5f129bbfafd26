//! # Air-Bridge Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/
//! │   ├── beacon.rs        # Simulated beacon publishing into an in-memory provider
//! │   └── integration/     # Cross-subsystem scenarios
//! │       ├── location_flow.rs
//! │       ├── bit_channel_flow.rs
//! │       └── recorder_flow.rs
//! └── benches/             # Criterion benchmarks
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p bridge-tests
//!
//! # By flow
//! cargo test -p bridge-tests integration::bit_channel_flow
//!
//! # Benchmarks
//! cargo bench -p bridge-tests
//! ```

pub mod beacon;
pub mod integration;
