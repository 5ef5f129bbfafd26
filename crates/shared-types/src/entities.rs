//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Lookup**: `LookupId`, `LookBack`
//! - **Reports**: `Report` as returned by the report provider
//! - **Decoded values**: `DecryptedLocation`, `DataByte`

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Length of an advertisement public key (x coordinate of a compressed P-224 point).
pub const PUBLIC_KEY_LEN: usize = 28;

/// Number of bit observations that make up one data byte.
pub const BITS_PER_BYTE: usize = 8;

/// Seconds between the Unix epoch and 2001-01-01T00:00:00Z, the epoch used by
/// device-reported timestamps.
pub const APPLE_EPOCH_OFFSET_SECS: i64 = 978_307_200;

/// A 28-byte advertisement key.
pub type AdvertisementKey = [u8; PUBLIC_KEY_LEN];

// =============================================================================
// CLUSTER A: LOOKUP
// =============================================================================

/// Base64 SHA-256 digest of an advertisement key.
///
/// This is the only index the report provider understands. It is derived from
/// a key (see `shared_crypto::lookup_id`) and never stored on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LookupId(String);

impl LookupId {
    /// Wrap an already-encoded lookup id, e.g. one echoed back by the provider.
    pub fn from_encoded(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// The base64 text of this id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LookupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How far back the report provider should search, in whole days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookBack {
    days: u32,
}

impl LookBack {
    /// A window of `days` days. Zero is raised to one day, the provider's minimum.
    pub fn days(days: u32) -> Self {
        Self { days: days.max(1) }
    }

    /// The smallest whole-day window covering `window`.
    pub fn covering(window: Duration) -> Self {
        const DAY_SECS: u64 = 24 * 60 * 60;
        let days = window.as_secs().div_ceil(DAY_SECS);
        Self::days(u32::try_from(days).unwrap_or(u32::MAX))
    }

    /// Number of days in the window.
    pub fn as_days(&self) -> u32 {
        self.days
    }
}

impl Default for LookBack {
    fn default() -> Self {
        Self::days(1)
    }
}

// =============================================================================
// CLUSTER B: REPORTS
// =============================================================================

/// A crowd-sourced report as published for one lookup id.
///
/// Fetched fresh per query and never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// The lookup id this report was filed under.
    pub lookup_id: LookupId,
    /// Raw (still encrypted) payload bytes.
    pub payload: Vec<u8>,
    /// Time the provider published the report, Unix milliseconds.
    pub published_at_millis: i64,
}

impl Report {
    /// Publish time as a UTC timestamp.
    pub fn published_at(&self) -> DateTime<Utc> {
        millis_to_utc(self.published_at_millis)
    }

    /// Whether the report carries data. The provider uses an empty payload or a
    /// publish time of 0/1 as a "no data" sentinel.
    pub fn is_usable(&self) -> bool {
        !self.payload.is_empty() && self.published_at_millis > 1
    }
}

// =============================================================================
// CLUSTER C: DECODED VALUES
// =============================================================================

/// A location fix recovered from one encrypted report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DecryptedLocation {
    /// Decimal degrees, positive north.
    pub latitude: f64,
    /// Decimal degrees, positive east.
    pub longitude: f64,
    /// Accuracy self-reported by the finder device, in metres.
    pub accuracy_metres: u8,
    /// Raw confidence byte from the cleartext header (observed 0-3).
    ///
    /// The network operator does not document this value; it is preserved
    /// as-is and not reinterpreted.
    pub confidence: u8,
    /// Wall clock of the finder device when it heard the beacon.
    pub timestamp: DateTime<Utc>,
}

impl DecryptedLocation {
    /// A location is valid only when the finder reported a non-zero accuracy.
    pub fn is_valid(&self) -> bool {
        self.accuracy_metres > 0
    }

    /// All-zero coordinates with zero accuracy: decrypted fine, but no fix.
    pub fn is_empty_fix(&self) -> bool {
        self.latitude == 0.0 && self.longitude == 0.0 && self.accuracy_metres == 0
    }
}

/// One data byte reassembled from eight independently observed bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataByte {
    /// The assembled value, most significant bit first.
    pub value: u8,
    /// Latest publish time among the eight contributing reports.
    pub report_time: DateTime<Utc>,
    /// Time between the earliest and the latest contributing report.
    pub spread: Duration,
    /// The report that decided each bit, most significant bit first.
    pub bit_reports: [Report; BITS_PER_BYTE],
}

impl DataByte {
    /// Whether the contributing observations are coherent enough to trust.
    pub fn is_within(&self, max_spread: Duration) -> bool {
        self.spread <= max_spread
    }
}

// =============================================================================
// TIME HELPERS
// =============================================================================

/// Convert a device timestamp (seconds since 2001-01-01T00:00:00Z) to UTC.
pub fn apple_epoch_to_utc(seconds: u32) -> DateTime<Utc> {
    Utc.timestamp_opt(APPLE_EPOCH_OFFSET_SECS + i64::from(seconds), 0)
        .single()
        .unwrap_or_default()
}

/// Convert Unix milliseconds to UTC, clamping out-of-range values to the epoch.
pub fn millis_to_utc(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}
