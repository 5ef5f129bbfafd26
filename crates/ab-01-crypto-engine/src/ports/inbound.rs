//! # Inbound Ports (Driving Ports / API)

use crate::domain::errors::DecryptError;
use shared_types::DecryptedLocation;

/// Decrypts location reports addressed to one configured device.
///
/// Implementations must be thread-safe (`Send + Sync`) and hold no mutable
/// state, so concurrent calls need no synchronization.
pub trait LocationDecryptionApi: Send + Sync {
    /// Decrypt a single raw report payload.
    ///
    /// A `DecryptError` concerns this report only. Callers drop the report
    /// and carry on with the rest of the batch.
    fn decrypt(&self, payload: &[u8]) -> Result<DecryptedLocation, DecryptError>;
}
