//! # Recorder
//!
//! Long-running poller that turns the beacon's location trail and telemetry
//! messages into a persistent record history.
//!
//! ## Round
//!
//! ```text
//! sleep 3..5 min ─► task_for_round(i) ─► location history  ─┐
//!                                    └─► sensor bytes      ─┴─► newer than stored? ─► append ─► save
//! ```
//!
//! A failed poll (no report, stale byte, provider down, all reports failed to
//! decrypt) is logged and counted; the next round carries on. Only failing to
//! save the record file stops the recorder.

pub mod readings;
pub mod schedule;
pub mod store;

pub use readings::Sensor;
pub use schedule::{task_for_round, Jitter, Task, ROTATION};
pub use store::{Record, RecordKind, RecordStore, StoreError};

use ab_04_bit_channel::{BitChannelApi, ChannelError};
use ab_05_location_channel::{LocationError, LocationHistoryApi};
use bridge_telemetry::{
    record_error, HistogramTimer, BYTES_RESOLVED, BYTE_SPREAD, DECRYPT_FAILURES,
    LOCATIONS_DECRYPTED, MISSING_BITS, RECORDS_PERSISTED, REPORTS_RECEIVED, REPORT_QUERIES,
    STALE_BYTES,
};
use shared_types::{Classify, ErrorKind, LookBack};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Errors from one recorder poll.
#[derive(Debug, Error)]
pub enum PollError {
    #[error(transparent)]
    Channel(#[from] ChannelError),

    #[error(transparent)]
    Location(#[from] LocationError),
}

impl Classify for PollError {
    fn kind(&self) -> ErrorKind {
        match self {
            PollError::Channel(e) => e.kind(),
            PollError::Location(e) => e.kind(),
        }
    }
}

/// Recorder tuning.
#[derive(Debug, Clone, Copy)]
pub struct RecorderSettings {
    /// How far back each report query reaches.
    pub look_back: LookBack,
    /// Largest tolerated spread of the bit reports behind one byte.
    pub max_bit_spread: Duration,
    /// Sleep before each round.
    pub round_delay: Jitter,
}

impl Default for RecorderSettings {
    fn default() -> Self {
        Self {
            look_back: LookBack::days(2),
            max_bit_spread: Duration::from_secs(60 * 60),
            round_delay: Jitter::between_rounds(),
        }
    }
}

/// Polls the bit and location channels and persists new observations.
pub struct Recorder<B: BitChannelApi, L: LocationHistoryApi> {
    channel: B,
    location: L,
    store: RecordStore,
    settings: RecorderSettings,
}

impl<B: BitChannelApi, L: LocationHistoryApi> Recorder<B, L> {
    pub fn new(channel: B, location: L, store: RecordStore, settings: RecorderSettings) -> Self {
        Self {
            channel,
            location,
            store,
            settings,
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Run one poll and return how many records it appended.
    pub async fn poll(&mut self, task: Task) -> Result<usize, PollError> {
        match task {
            Task::Location => self.poll_location().await,
            Task::Sensor(sensor) => self.poll_sensor(sensor).await,
        }
    }

    async fn poll_location(&mut self) -> Result<usize, PollError> {
        let _timer = HistogramTimer::operation("fetch_history");
        let batch = match self.location.fetch_batch(self.settings.look_back).await {
            Ok(batch) => batch,
            Err(e) => {
                if matches!(e, LocationError::Query(_)) {
                    REPORT_QUERIES.with_label_values(&["location", "error"]).inc();
                }
                return Err(e.into());
            }
        };
        REPORT_QUERIES.with_label_values(&["location", "ok"]).inc();
        REPORTS_RECEIVED.inc_by(batch.reports as f64);
        DECRYPT_FAILURES.inc_by(batch.decrypt_failures as f64);
        LOCATIONS_DECRYPTED.inc_by(batch.locations.len() as f64);

        // Oldest first, so every fix newer than the stored trail is kept.
        let mut appended = 0;
        for location in batch.locations.into_iter().rev() {
            debug!(
                "[runtime] location {:.5},{:.5} ±{}m at {}",
                location.latitude, location.longitude, location.accuracy_metres, location.timestamp
            );
            if self.store.append(Record::location(location)) {
                appended += 1;
            }
        }
        RECORDS_PERSISTED
            .with_label_values(&[&RecordKind::Location.to_string()])
            .inc_by(appended as f64);
        Ok(appended)
    }

    async fn poll_sensor(&mut self, sensor: Sensor) -> Result<usize, PollError> {
        let _timer = HistogramTimer::operation("resolve_byte");
        let message_id = sensor.message_id();
        let bytes = match self
            .channel
            .resolve_bytes(
                message_id,
                sensor.byte_len(),
                self.settings.look_back,
                self.settings.max_bit_spread,
            )
            .await
        {
            Ok(bytes) => bytes,
            Err(e) => {
                match &e {
                    ChannelError::StaleData { .. } => STALE_BYTES.inc(),
                    ChannelError::NoReport { .. } => MISSING_BITS.inc(),
                    ChannelError::Query(_) => {
                        REPORT_QUERIES.with_label_values(&["bit", "error"]).inc()
                    }
                    _ => {}
                }
                return Err(e.into());
            }
        };
        REPORT_QUERIES.with_label_values(&["bit", "ok"]).inc();

        let message_label = message_id.to_string();
        for byte in &bytes {
            BYTES_RESOLVED.with_label_values(&[&message_label]).inc();
            BYTE_SPREAD.observe(byte.spread.as_secs_f64());
        }

        let kind = sensor.record_kind();
        // Every byte of a multi-byte reading must be newer than the stored one.
        if bytes.iter().any(|b| !self.store.is_newer(kind, b.report_time)) {
            debug!("[runtime] {} has no new reading", sensor);
            return Ok(0);
        }

        let Some(record) = sensor.decode(&bytes) else {
            return Ok(0);
        };
        info!(
            "[runtime] {} reading {:?} at {} (spread {:?})",
            sensor,
            bytes.iter().map(|b| b.value).collect::<Vec<u8>>(),
            record.time,
            record.bit_spread.unwrap_or_default()
        );
        if self.store.append(record) {
            RECORDS_PERSISTED.with_label_values(&[&kind.to_string()]).inc();
            Ok(1)
        } else {
            Ok(0)
        }
    }

    /// Poll the task of `round`, then persist the store.
    ///
    /// Poll failures are logged and counted, never returned.
    pub async fn run_round(&mut self, round: u64) -> Result<usize, StoreError> {
        let task = task_for_round(round);
        let appended = match self.poll(task).await {
            Ok(appended) => appended,
            Err(e) => {
                let kind = e.kind();
                record_error(kind);
                if kind.is_fatal() {
                    warn!("[runtime] round #{} {} failed, check configuration: {}", round, task, e);
                } else {
                    debug!("[runtime] round #{} {} yielded nothing: {}", round, task, e);
                }
                0
            }
        };
        self.store.save()?;
        Ok(appended)
    }

    /// Run rounds until `shutdown` flips to `true` or saving fails.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) -> Result<(), StoreError> {
        for round in 0u64.. {
            let delay = self.settings.round_delay.sample(&mut rand::thread_rng());
            info!(
                "[runtime] sleeping {:?} before round #{} ({})",
                delay,
                round,
                task_for_round(round)
            );

            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = shutdown.changed() => {
                    info!("[runtime] recorder stopping");
                    return Ok(());
                }
            }

            let appended = self.run_round(round).await?;
            if appended > 0 {
                info!(
                    "[runtime] round #{} appended {} records ({} total)",
                    round,
                    appended,
                    self.store.records().len()
                );
            }
        }
        Ok(())
    }
}
