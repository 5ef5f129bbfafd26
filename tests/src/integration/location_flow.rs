//! # Location Flow
//!
//! Report query → crypto engine → location channel, against reports sealed
//! the way finder devices seal them.

#[cfg(test)]
mod tests {
    use crate::beacon::{fix_minutes_ago, now_millis, SimulatedBeacon, MINUTE_MS};
    use ab_04_bit_channel::QueryMode;
    use ab_05_location_channel::{LocationError, LocationHistoryApi};
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use bridge_runtime::commands;
    use shared_types::{Classify, ErrorKind, KeyLayout, LookBack};

    /// Reference report produced with an independent P-224/AES-GCM implementation.
    const VECTOR_PRIVATE_KEY: &str = "0f1e2d3c4b5a69788796a5b4c3d2e1f00112233445566778899aabbc";
    const VECTOR_PAYLOAD: &str = "29b927000204ab8323bdbbd6163bed73980b8423022255695bec67e45194015187\
                                  9572082356a939583c5f7b046b586c657f26d7b04aded1847a45382c6142452b0b\
                                  a8f789692a8622b31070a004346435b475f81094080f";

    #[test]
    fn test_known_vector_through_decrypt_command() {
        let key = STANDARD.encode(hex::decode(VECTOR_PRIVATE_KEY).unwrap());
        let payload = STANDARD.encode(hex::decode(VECTOR_PAYLOAD).unwrap());

        let location = commands::decrypt(&key, &payload).unwrap();
        assert!((location.latitude - 52.5200066).abs() < 1e-9);
        assert!((location.longitude - -13.404954).abs() < 1e-9);
        assert_eq!(location.accuracy_metres, 25);
        assert_eq!(location.confidence, 2);
        assert_eq!(location.timestamp.to_rfc3339(), "2023-03-08T20:26:40+00:00");
    }

    #[tokio::test]
    async fn test_two_bad_reports_in_ten_are_dropped() {
        let beacon = SimulatedBeacon::new(KeyLayout::IndexFirst);
        for i in 0..10u32 {
            let fix = fix_minutes_ago(10 * i + 5, 15);
            let published = now_millis() - i64::from(i) * MINUTE_MS;
            if i == 3 || i == 7 {
                beacon.report_undecryptable(&fix, published).await;
            } else {
                beacon.report_location(&fix, published).await;
            }
        }

        let services = beacon.services(QueryMode::Batched);
        let batch = services
            .location
            .fetch_batch(LookBack::days(1))
            .await
            .unwrap();
        assert_eq!(batch.reports, 10);
        assert_eq!(batch.decrypt_failures, 2);
        assert_eq!(batch.locations.len(), 8);

        let history = services
            .location
            .fetch_history(LookBack::days(1))
            .await
            .unwrap();
        assert_eq!(history.len(), 8);
        assert!(history
            .windows(2)
            .all(|pair| pair[0].timestamp > pair[1].timestamp));
    }

    #[tokio::test]
    async fn test_zero_accuracy_fixes_are_excluded() {
        let beacon = SimulatedBeacon::new(KeyLayout::IndexFirst);
        beacon
            .report_location(&fix_minutes_ago(30, 0), now_millis() - 3 * MINUTE_MS)
            .await;
        beacon
            .report_location(&fix_minutes_ago(20, 40), now_millis() - 2 * MINUTE_MS)
            .await;
        beacon
            .report_location(&fix_minutes_ago(10, 0), now_millis() - MINUTE_MS)
            .await;

        let history = beacon
            .services(QueryMode::Batched)
            .location
            .fetch_history(LookBack::days(1))
            .await
            .unwrap();
        assert_eq!(history.len(), 1);
        assert!(history.iter().all(|l| l.accuracy_metres > 0));
    }

    #[tokio::test]
    async fn test_all_reports_failing_points_at_the_key() {
        let beacon = SimulatedBeacon::new(KeyLayout::IndexFirst);
        for i in 0..4u32 {
            beacon
                .report_undecryptable(&fix_minutes_ago(i, 10), now_millis() - i64::from(i) * MINUTE_MS)
                .await;
        }

        let err = beacon
            .services(QueryMode::Batched)
            .location
            .fetch_history(LookBack::days(1))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(!err.is_retryable());
        assert_eq!(
            err,
            LocationError::AllReportsFailed {
                lookup_id: beacon.location_id(),
                reports: 4,
            }
        );
    }

    #[tokio::test]
    async fn test_no_reports_is_an_empty_history() {
        let beacon = SimulatedBeacon::new(KeyLayout::IndexFirst);
        let history = beacon
            .services(QueryMode::Batched)
            .location
            .fetch_history(LookBack::days(1))
            .await
            .unwrap();
        assert!(history.is_empty());
    }
}
