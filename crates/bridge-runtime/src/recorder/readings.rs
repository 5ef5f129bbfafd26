//! # Sensor Readings
//!
//! The beacon firmware assigns one message id per sensor and scales each
//! reading into one or two bytes. This module maps message bytes back to
//! physical units.
//!
//! | Message | Sensor                   | Bytes | Value                          |
//! |---------|--------------------------|-------|--------------------------------|
//! | 0       | temperature (°C)         | 1     | `v / 3 - 40`                   |
//! | 1       | relative humidity (%)    | 1     | `v / 2.55`                     |
//! | 2       | pressure (hPa)           | 2     | `u16be / (65535 / 1100) + 100` |
//! | 4       | nearby Bluetooth devices | 1     | raw                            |
//! | 5       | manual message           | 1     | raw                            |

use super::store::{Record, RecordKind};
use shared_types::DataByte;
use std::fmt;

/// Lowest pressure the firmware encodes, in hPa.
const PRESSURE_FLOOR_HPA: f64 = 100.0;

/// Width of the encoded pressure range, in hPa.
const PRESSURE_RANGE_HPA: f64 = 1100.0;

/// A telemetry source transmitted over the bit channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sensor {
    Temperature,
    Humidity,
    Pressure,
    BtDeviceCount,
    ManualMessage,
}

impl Sensor {
    /// Message id the firmware transmits this sensor under.
    pub fn message_id(self) -> u32 {
        match self {
            Sensor::Temperature => 0,
            Sensor::Humidity => 1,
            Sensor::Pressure => 2,
            Sensor::BtDeviceCount => 4,
            Sensor::ManualMessage => 5,
        }
    }

    /// Number of message bytes one reading occupies.
    pub fn byte_len(self) -> u32 {
        match self {
            Sensor::Pressure => 2,
            _ => 1,
        }
    }

    pub fn record_kind(self) -> RecordKind {
        match self {
            Sensor::Temperature => RecordKind::Temperature,
            Sensor::Humidity => RecordKind::Humidity,
            Sensor::Pressure => RecordKind::Pressure,
            Sensor::BtDeviceCount => RecordKind::BtDeviceCount,
            Sensor::ManualMessage => RecordKind::ManualMessage,
        }
    }

    /// Decode resolved message bytes into a record.
    ///
    /// The record takes the newest report time and the widest spread among
    /// the bytes. Returns `None` when fewer than `byte_len` bytes are given.
    pub fn decode(self, bytes: &[DataByte]) -> Option<Record> {
        if bytes.len() < self.byte_len() as usize {
            return None;
        }

        let time = bytes.iter().map(|b| b.report_time).max()?;
        let bit_spread = bytes.iter().map(|b| b.spread).max()?;
        let mut record = Record::at(time).with_bit_spread(bit_spread);

        match self {
            Sensor::Temperature => record.temp_c = Some(temperature_c(bytes[0].value)),
            Sensor::Humidity => record.humidity_pct = Some(humidity_pct(bytes[0].value)),
            Sensor::Pressure => {
                record.pressure_hpa = Some(pressure_hpa([bytes[0].value, bytes[1].value]))
            }
            Sensor::BtDeviceCount => record.bt_device_count = Some(bytes[0].value),
            Sensor::ManualMessage => record.manual_message = Some(bytes[0].value),
        }
        Some(record)
    }
}

impl fmt::Display for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Sensor::Temperature => "temperature",
            Sensor::Humidity => "humidity",
            Sensor::Pressure => "pressure",
            Sensor::BtDeviceCount => "bt_device_count",
            Sensor::ManualMessage => "manual_message",
        })
    }
}

/// Ambient temperature in °C, in steps of 1/3 °C from -40 °C.
pub fn temperature_c(value: u8) -> f64 {
    f64::from(value) / 3.0 - 40.0
}

/// Relative humidity in percent, 0xFF being 100 %.
pub fn humidity_pct(value: u8) -> f64 {
    f64::from(value) / 2.55
}

/// Ambient pressure in hPa from a big-endian 16-bit reading.
pub fn pressure_hpa(bytes: [u8; 2]) -> f64 {
    f64::from(u16::from_be_bytes(bytes)) / (f64::from(u16::MAX) / PRESSURE_RANGE_HPA)
        + PRESSURE_FLOOR_HPA
}
