//! Prometheus metrics for Air-Bridge.
//!
//! All metrics follow the naming convention: `ab_<area>_<metric>_<unit>`
//!
//! Core crates stay metric-free; the runtime records these from operation
//! outcomes.

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, Histogram, HistogramOpts, HistogramVec,
    Opts, Registry, TextEncoder,
};
use shared_types::ErrorKind;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // REPORT QUERY METRICS
    // =========================================================================

    /// Report provider round trips, by channel and outcome
    pub static ref REPORT_QUERIES: CounterVec = CounterVec::new(
        Opts::new("ab_report_queries_total", "Report provider queries"),
        &["channel", "outcome"]  // channel: bit/location, outcome: ok/error
    ).expect("metric creation failed");

    /// Usable reports received
    pub static ref REPORTS_RECEIVED: Counter = Counter::new(
        "ab_reports_received_total",
        "Usable reports received from the provider"
    ).expect("metric creation failed");

    // =========================================================================
    // LOCATION METRICS
    // =========================================================================

    /// Reports that failed to decrypt
    pub static ref DECRYPT_FAILURES: Counter = Counter::new(
        "ab_location_decrypt_failures_total",
        "Location reports that failed to decrypt"
    ).expect("metric creation failed");

    /// Valid locations recovered
    pub static ref LOCATIONS_DECRYPTED: Counter = Counter::new(
        "ab_location_fixes_total",
        "Valid location fixes decrypted"
    ).expect("metric creation failed");

    // =========================================================================
    // BIT CHANNEL METRICS
    // =========================================================================

    /// Bytes resolved, by message id
    pub static ref BYTES_RESOLVED: CounterVec = CounterVec::new(
        Opts::new("ab_channel_bytes_resolved_total", "Data bytes resolved"),
        &["message"]
    ).expect("metric creation failed");

    /// Bytes rejected by the spread guard
    pub static ref STALE_BYTES: Counter = Counter::new(
        "ab_channel_stale_bytes_total",
        "Data bytes whose bit reports exceeded the spread tolerance"
    ).expect("metric creation failed");

    /// Bytes that could not be resolved because a bit had no report
    pub static ref MISSING_BITS: Counter = Counter::new(
        "ab_channel_missing_bits_total",
        "Byte resolutions that failed on an unreported bit"
    ).expect("metric creation failed");

    /// Spread of resolved bytes
    pub static ref BYTE_SPREAD: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "ab_channel_byte_spread_seconds",
            "Time between the oldest and newest bit report of a byte"
        ).buckets(exponential_buckets(1.0, 2.0, 14).unwrap_or_default())
    ).expect("metric creation failed");

    // =========================================================================
    // OPERATION METRICS
    // =========================================================================

    /// Operation duration, by operation
    pub static ref OPERATION_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "ab_operation_duration_seconds",
            "Wall time of bridge operations"
        ).buckets(exponential_buckets(0.01, 2.0, 16).unwrap_or_default()),
        &["operation"]  // operation: resolve_byte/fetch_history
    ).expect("metric creation failed");

    /// Records appended to the record file, by kind
    pub static ref RECORDS_PERSISTED: CounterVec = CounterVec::new(
        Opts::new("ab_records_persisted_total", "Records appended to the record file"),
        &["kind"]
    ).expect("metric creation failed");

    /// Errors by kind
    pub static ref ERRORS: CounterVec = CounterVec::new(
        Opts::new("ab_errors_total", "Errors by disposition kind"),
        &["kind"]
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Report queries
        Box::new(REPORT_QUERIES.clone()),
        Box::new(REPORTS_RECEIVED.clone()),
        // Location
        Box::new(DECRYPT_FAILURES.clone()),
        Box::new(LOCATIONS_DECRYPTED.clone()),
        // Bit channel
        Box::new(BYTES_RESOLVED.clone()),
        Box::new(STALE_BYTES.clone()),
        Box::new(MISSING_BITS.clone()),
        Box::new(BYTE_SPREAD.clone()),
        // Operations
        Box::new(OPERATION_DURATION.clone()),
        Box::new(RECORDS_PERSISTED.clone()),
        Box::new(ERRORS.clone()),
    ];

    for metric in metrics {
        REGISTRY
            .register(metric)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    }
    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Count one error under its disposition kind.
pub fn record_error(kind: ErrorKind) {
    ERRORS.with_label_values(&[&kind.to_string()]).inc();
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }

    /// Start a timer for one `OPERATION_DURATION` label.
    pub fn operation(name: &str) -> Self {
        Self::new(&OPERATION_DURATION.with_label_values(&[name]))
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        self.histogram.observe(duration);
    }
}
