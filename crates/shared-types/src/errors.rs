//! # Error Kinds
//!
//! Every subsystem error maps onto one of these kinds. The kind decides the
//! disposition, not the subsystem that raised it.
//!
//! | Kind | Disposition |
//! |------|-------------|
//! | `Configuration` | fatal, bad key material or key-layout mismatch |
//! | `Transport` | propagate, caller decides on retry |
//! | `NoReport` | transient, retry after a cooldown |
//! | `StaleData` | transient, value is advisory only |
//! | `Decrypt` | drop the single report |

use std::fmt;

/// Classification of a failure by how the caller should react to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Key material or wire layout does not match the beacon.
    Configuration,
    /// The report provider could not be reached or answered garbage.
    Transport,
    /// Neither guess of a bit has been observed yet.
    NoReport,
    /// Observations were too far apart in time to form one value.
    StaleData,
    /// A single report could not be decrypted.
    Decrypt,
}

impl ErrorKind {
    /// Whether repeating the operation later may succeed.
    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            ErrorKind::Transport | ErrorKind::NoReport | ErrorKind::StaleData
        )
    }

    /// Whether the failure indicates the run cannot succeed without new configuration.
    pub fn is_fatal(self) -> bool {
        matches!(self, ErrorKind::Configuration)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::Transport => "transport",
            ErrorKind::NoReport => "no_report",
            ErrorKind::StaleData => "stale_data",
            ErrorKind::Decrypt => "decrypt",
        };
        f.write_str(name)
    }
}

/// Implemented by every subsystem error so callers can branch on the kind.
pub trait Classify {
    /// The disposition class of this error.
    fn kind(&self) -> ErrorKind;

    /// Shorthand for `self.kind().is_retryable()`.
    fn is_retryable(&self) -> bool {
        self.kind().is_retryable()
    }
}
