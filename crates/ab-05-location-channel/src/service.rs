//! # Location Channel Service

use crate::domain::batch::LocationBatch;
use crate::domain::errors::LocationError;
use crate::ports::inbound::LocationHistoryApi;
use ab_01_crypto_engine::LocationDecryptionApi;
use ab_03_report_query::ReportQueryApi;
use async_trait::async_trait;
use shared_crypto::lookup_id;
use shared_types::{AdvertisementKey, LookBack, LookupId};
use tracing::{info, instrument, warn};

/// Location channel service.
pub struct LocationChannel<D: LocationDecryptionApi, Q: ReportQueryApi> {
    decryptor: D,
    query: Q,
    lookup_id: LookupId,
}

impl<D: LocationDecryptionApi, Q: ReportQueryApi> LocationChannel<D, Q> {
    /// Create a channel for the beacon broadcasting `advertisement_key`.
    pub fn new(decryptor: D, query: Q, advertisement_key: &AdvertisementKey) -> Self {
        Self {
            decryptor,
            query,
            lookup_id: lookup_id(advertisement_key),
        }
    }

    pub fn lookup_id(&self) -> &LookupId {
        &self.lookup_id
    }
}

#[async_trait]
impl<D: LocationDecryptionApi, Q: ReportQueryApi> LocationHistoryApi for LocationChannel<D, Q> {
    #[instrument(skip(self), fields(id = %self.lookup_id))]
    async fn fetch_batch(&self, look_back: LookBack) -> Result<LocationBatch, LocationError> {
        let reports = self.query.fetch_all(&self.lookup_id, look_back).await?;

        let batch = LocationBatch::from_outcomes(
            self.lookup_id.clone(),
            reports.iter().map(|r| self.decryptor.decrypt(&r.payload)),
        );

        if batch.decrypt_failures > 0 {
            warn!(
                "[ab-05] {} of {} reports failed to decrypt",
                batch.decrypt_failures, batch.reports
            );
        }
        let batch = batch.into_result()?;

        info!(
            "[ab-05] {} locations from {} reports ({} without a fix)",
            batch.locations.len(),
            batch.reports,
            batch.invalid
        );
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ab_01_crypto_engine::fixtures::{seal_report, LocationFix};
    use ab_01_crypto_engine::CryptoEngine;
    use ab_03_report_query::{InMemoryReportProvider, ReportQuery};
    use chrono::Utc;
    use shared_crypto::{advertisement_key_of, parse_private_key};
    use shared_types::{Classify, ErrorKind, LocationPrivateKey, Report};
    use std::sync::Arc;

    const DEVICE_KEY: [u8; 28] = [0x11; 28];
    const OTHER_KEY: [u8; 28] = [0x22; 28];

    type TestChannel = LocationChannel<CryptoEngine, ReportQuery<Arc<InMemoryReportProvider>>>;

    fn channel(private_key: [u8; 28]) -> (TestChannel, Arc<InMemoryReportProvider>) {
        let device = parse_private_key(&DEVICE_KEY).unwrap();
        let engine =
            CryptoEngine::new(&LocationPrivateKey::from_slice(&private_key).unwrap()).unwrap();
        let provider = Arc::new(InMemoryReportProvider::new());
        let channel = LocationChannel::new(
            engine,
            ReportQuery::new(provider.clone()),
            &advertisement_key_of(&device),
        );
        (channel, provider)
    }

    /// A report for fix number `n`, sealed to the holder of `recipient`.
    fn sealed(recipient: [u8; 28], id: &LookupId, n: u8, accuracy_metres: u8) -> Report {
        let recipient = parse_private_key(&recipient).unwrap();
        let ephemeral = parse_private_key(&[n.wrapping_add(0x30); 28]).unwrap();
        let fix = LocationFix {
            latitude: 52.0 + f64::from(n) / 100.0,
            longitude: 13.0,
            accuracy_metres,
            confidence: 2,
            seen_at: 700_000_000 + u32::from(n) * 600,
        };
        Report {
            lookup_id: id.clone(),
            payload: seal_report(&recipient.public_key(), &ephemeral, &fix).unwrap(),
            published_at_millis: Utc::now().timestamp_millis() - i64::from(n) * 1_000,
        }
    }

    #[tokio::test]
    async fn test_partial_decrypt_failures_are_dropped() {
        let (channel, provider) = channel(DEVICE_KEY);
        let id = channel.lookup_id().clone();
        for n in 0..8 {
            provider.publish(sealed(DEVICE_KEY, &id, n, 10)).await;
        }
        for n in 8..10 {
            provider.publish(sealed(OTHER_KEY, &id, n, 10)).await;
        }

        let batch = channel.fetch_batch(LookBack::default()).await.unwrap();
        assert_eq!(batch.reports, 10);
        assert_eq!(batch.decrypt_failures, 2);
        assert_eq!(batch.locations.len(), 8);
        assert!(batch
            .locations
            .windows(2)
            .all(|w| w[0].timestamp > w[1].timestamp));
    }

    #[tokio::test]
    async fn test_wrong_key_is_configuration_error() {
        let (channel, provider) = channel(OTHER_KEY);
        let id = channel.lookup_id().clone();
        for n in 0..3 {
            provider.publish(sealed(DEVICE_KEY, &id, n, 10)).await;
        }

        let err = channel.fetch_history(LookBack::default()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(matches!(err, LocationError::AllReportsFailed { reports: 3, .. }));
    }

    #[tokio::test]
    async fn test_zero_accuracy_fixes_are_excluded() {
        let (channel, provider) = channel(DEVICE_KEY);
        let id = channel.lookup_id().clone();
        provider.publish(sealed(DEVICE_KEY, &id, 1, 0)).await;
        provider.publish(sealed(DEVICE_KEY, &id, 2, 30)).await;

        let history = channel.fetch_history(LookBack::default()).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].accuracy_metres, 30);
    }

    #[tokio::test]
    async fn test_no_reports_is_empty_history() {
        let (channel, _) = channel(DEVICE_KEY);
        assert!(channel
            .fetch_history(LookBack::default())
            .await
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_lookup_id_is_hash_of_advertisement_key() {
        let (channel, _) = channel(DEVICE_KEY);
        let device = parse_private_key(&DEVICE_KEY).unwrap();
        assert_eq!(
            channel.lookup_id(),
            &shared_crypto::lookup_id(&advertisement_key_of(&device))
        );
    }
}
