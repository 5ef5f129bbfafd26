//! # Bridge Telemetry
//!
//! Logging and metrics for Air-Bridge.
//!
//! ## Components
//!
//! - **Logging**: `tracing-subscriber` with an `EnvFilter`, human-readable or JSON
//! - **Metrics**: Prometheus counters and histograms in a global registry
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bridge_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     init_telemetry(&TelemetryConfig::from_env()).expect("Failed to init telemetry");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `AB_SERVICE_NAME` | `air-bridge` | Service name in logs |
//! | `AB_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `AB_CONSOLE_OUTPUT` | `true` | Write logs to the console |
//! | `AB_JSON_LOGS` | `false` | JSON log lines (default `true` in containers) |

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::{env_filter, init_logging};
pub use metrics::{
    encode_metrics, record_error, register_metrics, HistogramTimer, BYTES_RESOLVED, BYTE_SPREAD,
    DECRYPT_FAILURES, ERRORS, LOCATIONS_DECRYPTED, MISSING_BITS, OPERATION_DURATION,
    RECORDS_PERSISTED, REPORTS_RECEIVED, REPORT_QUERIES, STALE_BYTES,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Register metrics and install the global log subscriber.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    register_metrics()?;
    init_logging(config)
}

