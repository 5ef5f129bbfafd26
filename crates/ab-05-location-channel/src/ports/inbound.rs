//! # Inbound Ports (Driving Ports / API)

use crate::domain::batch::LocationBatch;
use crate::domain::errors::LocationError;
use async_trait::async_trait;
use shared_types::{DecryptedLocation, LookBack};

/// Location history of the configured beacon.
#[async_trait]
pub trait LocationHistoryApi: Send + Sync {
    /// Decrypt every report within the window and keep the batch counts.
    async fn fetch_batch(&self, look_back: LookBack) -> Result<LocationBatch, LocationError>;

    /// Valid locations within the window, newest first.
    async fn fetch_history(
        &self,
        look_back: LookBack,
    ) -> Result<Vec<DecryptedLocation>, LocationError> {
        Ok(self.fetch_batch(look_back).await?.locations)
    }
}
