//! # Bit Channel Subsystem (AB-04)
//!
//! Reads one byte of a beacon message. Each bit is broadcast as one of two
//! advertisement keys; whichever key the crowd reported most recently decides
//! the bit.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): bit resolution, byte assembly and the spread guard
//! - **Ports Layer** (`ports/`): `BitChannelApi` (inbound) and `Pacer` (outbound)
//! - **Service Layer** (`service.rs`): `BitChannel`, which derives the 16 lookup ids,
//!   queries them and hands the reports to the domain
//!
//! ## Resolving One Byte
//!
//! ```text
//! bit index  byte*8 .. byte*8+7   (first index is the most significant bit)
//!      │
//!      ├─► key(bit=1) ─► id_true  ─┐
//!      └─► key(bit=0) ─► id_false ─┴─► report pair ─► freshest wins ─► bit
//!
//! 8 bits ─► value, report time = newest, spread = newest - oldest ─► spread guard
//! ```
//!
//! ## Query Modes
//!
//! `Batched` sends all 16 ids in one request. `PerId` sends them one at a time
//! with a caller-supplied `Pacer` between requests, for providers that rate limit.

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::entities::{bit_indices, QueryMode, ResolvedBit};
pub use domain::errors::ChannelError;
pub use domain::resolve::{assemble, resolve_bit};
pub use ports::inbound::BitChannelApi;
pub use ports::outbound::{NoPacing, Pacer};
pub use service::BitChannel;
