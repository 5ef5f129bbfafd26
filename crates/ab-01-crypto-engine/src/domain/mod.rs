//! # Domain Layer
//!
//! Pure decryption logic with no I/O dependencies.

pub mod decrypt;
pub mod errors;
pub mod payload;
