//! # Domain Layer

pub mod collate;
pub mod errors;
pub mod wire;
