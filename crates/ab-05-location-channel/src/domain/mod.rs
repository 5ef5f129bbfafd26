//! # Domain Layer

pub mod batch;
pub mod errors;
