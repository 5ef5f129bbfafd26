//! # Record Store
//!
//! The recorder's persistent history: a JSON document `{"records": [...]}`
//! holding one entry per observed reading or location fix.
//!
//! ## Invariants
//!
//! - For each `RecordKind`, a record is appended only when its time is
//!   strictly newer than the latest stored record of that kind. Re-reading
//!   the same report never duplicates a record.
//! - `save` replaces the file through a sibling temporary file, so a crash
//!   mid-write leaves the previous document intact.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_types::DecryptedLocation;
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Record store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the record file failed
    #[error("Record file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The record file is not a valid record document
    #[error("Record file {path} is malformed: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Serializing the records failed
    #[error("Failed to serialize records: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// What a record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Location,
    Temperature,
    Humidity,
    Pressure,
    BtDeviceCount,
    ManualMessage,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RecordKind::Location => "location",
            RecordKind::Temperature => "temperature",
            RecordKind::Humidity => "humidity",
            RecordKind::Pressure => "pressure",
            RecordKind::BtDeviceCount => "bt_device_count",
            RecordKind::ManualMessage => "manual_message",
        })
    }
}

/// One persisted observation. Exactly one value field is set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_c: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure_hpa: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bt_device_count: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_message: Option<u8>,
    /// Report time for channel readings, device time for location fixes.
    pub time: DateTime<Utc>,
    /// Spread of the bit reports behind a channel reading, in nanoseconds.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "nanos")]
    pub bit_spread: Option<Duration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<DecryptedLocation>,
}

impl Record {
    /// An empty record stamped with `time`.
    pub fn at(time: DateTime<Utc>) -> Self {
        Self {
            time,
            ..Self::default()
        }
    }

    pub fn with_bit_spread(mut self, spread: Duration) -> Self {
        self.bit_spread = Some(spread);
        self
    }

    /// A record holding one location fix, stamped with the fix's device time.
    pub fn location(location: DecryptedLocation) -> Self {
        Self {
            time: location.timestamp,
            location: Some(location),
            ..Self::default()
        }
    }

    /// The kind of value this record carries, `None` for an empty record.
    ///
    /// Location fixes with zero accuracy do not count as locations.
    pub fn kind(&self) -> Option<RecordKind> {
        if self.location.as_ref().is_some_and(DecryptedLocation::is_valid) {
            Some(RecordKind::Location)
        } else if self.temp_c.is_some() {
            Some(RecordKind::Temperature)
        } else if self.humidity_pct.is_some() {
            Some(RecordKind::Humidity)
        } else if self.pressure_hpa.is_some() {
            Some(RecordKind::Pressure)
        } else if self.bt_device_count.is_some() {
            Some(RecordKind::BtDeviceCount)
        } else if self.manual_message.is_some() {
            Some(RecordKind::ManualMessage)
        } else {
            None
        }
    }
}

#[derive(Default, Serialize, Deserialize)]
struct RecordDocument {
    #[serde(default)]
    records: Vec<Record>,
}

/// Append-only record history backed by a JSON file.
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    records: Vec<Record>,
    latest: HashMap<RecordKind, DateTime<Utc>>,
}

impl RecordStore {
    /// Load the store at `path`. A missing file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let document = match std::fs::read(&path) {
            Ok(content) => serde_json::from_slice::<RecordDocument>(&content).map_err(|source| {
                StoreError::Malformed {
                    path: path.clone(),
                    source,
                }
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => RecordDocument::default(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        let mut store = Self {
            path,
            records: Vec::with_capacity(document.records.len()),
            latest: HashMap::new(),
        };
        for record in document.records {
            store.track(&record);
            store.records.push(record);
        }
        debug!(
            "[runtime] loaded {} records from {}",
            store.records.len(),
            store.path.display()
        );
        Ok(store)
    }

    fn track(&mut self, record: &Record) {
        if let Some(kind) = record.kind() {
            let latest = self.latest.entry(kind).or_insert(record.time);
            if record.time > *latest {
                *latest = record.time;
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Time of the newest stored record of `kind`.
    pub fn latest(&self, kind: RecordKind) -> Option<DateTime<Utc>> {
        self.latest.get(&kind).copied()
    }

    /// Whether a record of `kind` at `time` would be appended.
    pub fn is_newer(&self, kind: RecordKind, time: DateTime<Utc>) -> bool {
        self.latest(kind).map_or(true, |latest| time > latest)
    }

    /// Append `record` if it is newer than every stored record of its kind.
    ///
    /// Returns whether the record was appended. Empty records are refused.
    pub fn append(&mut self, record: Record) -> bool {
        match record.kind() {
            Some(kind) if self.is_newer(kind, record.time) => {
                self.latest.insert(kind, record.time);
                self.records.push(record);
                true
            }
            _ => false,
        }
    }

    /// Write every record to the backing file.
    pub fn save(&self) -> Result<(), StoreError> {
        let document = RecordDocument {
            records: self.records.clone(),
        };
        let content = serde_json::to_vec(&document).map_err(StoreError::Serialize)?;

        let staging = self.path.with_extension("tmp");
        std::fs::write(&staging, content).map_err(|source| StoreError::Io {
            path: staging.clone(),
            source,
        })?;
        std::fs::rename(&staging, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// `Option<Duration>` as integer nanoseconds.
mod nanos {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => s.serialize_u64(u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(d)?.map(Duration::from_nanos))
    }
}
