//! # Domain Layer
//!
//! Pure key construction and search. No I/O, no shared state.

pub mod entities;
pub mod errors;
pub mod search;
pub mod template;
