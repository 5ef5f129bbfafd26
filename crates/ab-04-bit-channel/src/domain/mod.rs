//! # Domain Layer
//!
//! Pure resolution of report pairs into bits and bytes.

pub mod entities;
pub mod errors;
pub mod resolve;
