//! # Bit Channel Entities

use serde::{Deserialize, Serialize};
use shared_types::{Report, BITS_PER_BYTE};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// How the 16 lookup ids of a byte are sent to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QueryMode {
    /// One request carrying every id.
    #[default]
    Batched,
    /// One request per id, paced by the caller.
    PerId,
}

impl FromStr for QueryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "batched" | "batch" => Ok(QueryMode::Batched),
            "per-id" | "per_id" | "single" => Ok(QueryMode::PerId),
            other => Err(format!(
                "unknown query mode '{other}', expected 'batched' or 'per-id'"
            )),
        }
    }
}

impl fmt::Display for QueryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryMode::Batched => f.write_str("batched"),
            QueryMode::PerId => f.write_str("per-id"),
        }
    }
}

/// One bit and the report that decided it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedBit {
    pub value: bool,
    pub report: Report,
}

/// Absolute bit indices of `byte_index`, most significant bit first.
///
/// Returns `None` when the indices would not fit in a `u32`.
pub fn bit_indices(byte_index: u32) -> Option<Range<u32>> {
    let first = byte_index.checked_mul(BITS_PER_BYTE as u32)?;
    let end = first.checked_add(BITS_PER_BYTE as u32)?;
    Some(first..end)
}
