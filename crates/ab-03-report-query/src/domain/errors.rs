//! # Query Errors

use shared_types::{Classify, ErrorKind};
use thiserror::Error;

/// Errors talking to the report provider. All of them are transport failures
/// and are left to the caller to retry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    /// Could not build the HTTP client
    #[error("Report client setup failed: {0}")]
    Client(String),

    /// Connection refused, reset or timed out
    #[error("Report provider unreachable at {endpoint}: {reason}")]
    Connection { endpoint: String, reason: String },

    /// Provider answered with a non-success status
    #[error("Report provider returned HTTP {status} for {ids} ids")]
    Status { status: u16, ids: usize },

    /// Response body was not the expected JSON
    #[error("Malformed report response: {0}")]
    Decode(String),
}

impl Classify for QueryError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Transport
    }
}
