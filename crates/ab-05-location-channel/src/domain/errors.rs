//! # Location Errors

use ab_03_report_query::QueryError;
use shared_types::{Classify, ErrorKind, LookupId};
use thiserror::Error;

/// Errors from fetching the location history.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LocationError {
    /// Report provider failure
    #[error("Report query failed: {0}")]
    Query(#[from] QueryError),

    /// Not a single report decrypted
    #[error("All {reports} reports for {lookup_id} failed to decrypt, likely wrong private key")]
    AllReportsFailed { lookup_id: LookupId, reports: usize },
}

impl Classify for LocationError {
    fn kind(&self) -> ErrorKind {
        match self {
            LocationError::Query(_) => ErrorKind::Transport,
            LocationError::AllReportsFailed { .. } => ErrorKind::Configuration,
        }
    }
}
