//! # Bit and Byte Resolution

use super::entities::ResolvedBit;
use shared_types::{millis_to_utc, DataByte, Report, BITS_PER_BYTE};
use std::time::Duration;

/// Decide one bit from the reports of its two keys.
///
/// - neither reported: `None`
/// - one reported: that key's value
/// - both reported: the strictly newer report wins; on equal publish times the
///   set bit is taken
pub fn resolve_bit(set: Option<&Report>, clear: Option<&Report>) -> Option<ResolvedBit> {
    let (value, report) = match (set, clear) {
        (None, None) => return None,
        (Some(set), None) => (true, set),
        (None, Some(clear)) => (false, clear),
        (Some(set), Some(clear)) => {
            if clear.published_at_millis > set.published_at_millis {
                (false, clear)
            } else {
                (true, set)
            }
        }
    };
    Some(ResolvedBit {
        value,
        report: report.clone(),
    })
}

/// Assemble eight resolved bits, most significant first, into a byte with its
/// report time and spread.
pub fn assemble(bits: [ResolvedBit; BITS_PER_BYTE]) -> DataByte {
    let value = bits
        .iter()
        .fold(0u8, |acc, bit| (acc << 1) | u8::from(bit.value));

    let newest = bits
        .iter()
        .map(|b| b.report.published_at_millis)
        .max()
        .unwrap_or_default();
    let oldest = bits
        .iter()
        .map(|b| b.report.published_at_millis)
        .min()
        .unwrap_or_default();
    let spread = Duration::from_millis(u64::try_from(newest - oldest).unwrap_or_default());

    DataByte {
        value,
        report_time: millis_to_utc(newest),
        spread,
        bit_reports: bits.map(|b| b.report),
    }
}
