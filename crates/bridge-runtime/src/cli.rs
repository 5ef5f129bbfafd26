//! # Command Line
//!
//! Every flag has an environment fallback so the recorder can run from a
//! container without a wrapper script.

use crate::container::{KeyMaterial, RuntimeConfig};
use ab_03_report_query::DEFAULT_REPORT_ADDR;
use ab_04_bit_channel::QueryMode;
use clap::{Args, Parser, Subcommand};
use shared_types::{KeyLayout, DEFAULT_MAX_ATTEMPTS};
use std::path::PathBuf;
use std::time::Duration;

/// Air-Bridge: location trail and telemetry recovery over the offline-finding network
#[derive(Parser, Debug)]
#[command(name = "air-bridge", version)]
#[command(about = "Recover beacon locations and telemetry bytes from crowd-sourced reports")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Poll locations and telemetry forever, appending new records to a JSON file
    Record {
        #[command(flatten)]
        keys: KeyArgs,
        #[command(flatten)]
        provider: ProviderArgs,
        /// File holding the record history
        #[arg(long, env = "AB_RECORD_FILE", default_value = "air-bridge-records.json")]
        record_file: PathBuf,
    },

    /// Print the beacon's decrypted location trail, newest first
    Locate {
        #[command(flatten)]
        keys: KeyArgs,
        #[command(flatten)]
        provider: ProviderArgs,
    },

    /// Read the first bytes of one message from the bit channel
    Read {
        #[command(flatten)]
        keys: KeyArgs,
        #[command(flatten)]
        provider: ProviderArgs,
        /// Message id
        #[arg(long, default_value_t = 0)]
        message: u32,
        /// Number of bytes to read
        #[arg(long, default_value_t = 4)]
        bytes: u32,
    },

    /// Decrypt a single location report payload
    Decrypt {
        /// Base64 P-224 private key
        #[arg(long)]
        privkey: String,
        /// Base64 encrypted report payload
        #[arg(long)]
        encpayload: String,
    },
}

/// Key material, all base64 encoded.
#[derive(Args, Debug, Clone)]
pub struct KeyArgs {
    /// Private key that decrypts the beacon's location reports
    #[arg(long = "locprivkey", env = "AB_LOCATION_PRIVATE_KEY", hide_env_values = true)]
    pub location_private_key: String,

    /// Advertisement key the beacon broadcasts for location reports (not its hash)
    #[arg(long = "locadvertkey", env = "AB_LOCATION_ADVERT_KEY")]
    pub location_advertisement_key: String,

    /// Two magic prefix bytes of the data-bit keys
    #[arg(long = "dataprefix", env = "AB_DATA_PREFIX")]
    pub data_prefix: String,

    /// Four-byte data modem id
    #[arg(long = "datamodem", env = "AB_DATA_MODEM")]
    pub data_modem: String,

    /// Data-bit key layout: index-first or message-first
    #[arg(long, env = "AB_KEY_LAYOUT", default_value_t = KeyLayout::IndexFirst)]
    pub layout: KeyLayout,

    /// Upper bound on the valid-key search per bit
    #[arg(long, env = "AB_MAX_ATTEMPTS", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,
}

impl From<KeyArgs> for KeyMaterial {
    fn from(args: KeyArgs) -> Self {
        KeyMaterial {
            location_private_key: args.location_private_key,
            location_advertisement_key: args.location_advertisement_key,
            data_prefix: args.data_prefix,
            data_modem: args.data_modem,
            layout: args.layout,
            max_attempts: args.max_attempts,
        }
    }
}

/// Report provider and query settings.
#[derive(Args, Debug, Clone)]
pub struct ProviderArgs {
    /// Report provider web service address
    #[arg(long = "reportaddr", env = "AB_REPORT_ADDR", default_value = DEFAULT_REPORT_ADDR)]
    pub report_addr: String,

    /// Query window in days
    #[arg(long, env = "AB_MAX_DAYS", default_value_t = 2)]
    pub max_days: u32,

    /// Largest tolerated spread of the eight bit reports of a byte, in minutes
    #[arg(long, env = "AB_MAX_BIT_SPREAD_MINS", default_value_t = 60)]
    pub max_bit_spread_mins: u64,

    /// Bit channel query mode: batched or per-id
    #[arg(long, env = "AB_QUERY_MODE", default_value_t = QueryMode::Batched)]
    pub query_mode: QueryMode,

    /// Provider request timeout in seconds
    #[arg(long, env = "AB_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,
}

impl ProviderArgs {
    pub fn runtime_config(&self, record_file: Option<PathBuf>) -> RuntimeConfig {
        let defaults = RuntimeConfig::default();
        RuntimeConfig {
            report_addr: self.report_addr.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            record_file: record_file.unwrap_or(defaults.record_file),
            max_days: self.max_days,
            max_bit_spread: Duration::from_secs(self.max_bit_spread_mins * 60),
            query_mode: self.query_mode,
        }
    }
}
