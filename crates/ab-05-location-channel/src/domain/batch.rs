//! # Location Batch
//!
//! Folds per-report decrypt outcomes into an ordered location list plus the
//! counts needed to judge the batch.

use super::errors::LocationError;
use ab_01_crypto_engine::DecryptError;
use shared_types::{DecryptedLocation, LookupId};

/// Outcome of decrypting every report of one lookup id.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationBatch {
    pub lookup_id: LookupId,
    /// Reports received from the provider.
    pub reports: usize,
    /// Reports that failed to decrypt.
    pub decrypt_failures: usize,
    /// Reports that decrypted to a zero-accuracy fix.
    pub invalid: usize,
    /// Valid locations, newest device timestamp first.
    pub locations: Vec<DecryptedLocation>,
}

impl LocationBatch {
    pub fn from_outcomes(
        lookup_id: LookupId,
        outcomes: impl IntoIterator<Item = Result<DecryptedLocation, DecryptError>>,
    ) -> Self {
        let mut batch = Self {
            lookup_id,
            reports: 0,
            decrypt_failures: 0,
            invalid: 0,
            locations: Vec::new(),
        };

        for outcome in outcomes {
            batch.reports += 1;
            match outcome {
                Ok(location) if location.is_valid() => batch.locations.push(location),
                Ok(_) => batch.invalid += 1,
                Err(_) => batch.decrypt_failures += 1,
            }
        }

        batch
            .locations
            .sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        batch
    }

    /// Whether every report in a non-empty batch failed to decrypt.
    pub fn all_failed(&self) -> bool {
        self.reports > 0 && self.decrypt_failures == self.reports
    }

    /// Reject a batch in which nothing decrypted.
    pub fn into_result(self) -> Result<Self, LocationError> {
        if self.all_failed() {
            return Err(LocationError::AllReportsFailed {
                lookup_id: self.lookup_id,
                reports: self.reports,
            });
        }
        Ok(self)
    }
}
