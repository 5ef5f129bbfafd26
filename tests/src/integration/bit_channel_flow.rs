//! # Bit Channel Flow
//!
//! Key encoder → report query → bit channel, against reports a simulated
//! beacon publishes for each bit of a message.

#[cfg(test)]
mod tests {
    use crate::beacon::{now_millis, SimulatedBeacon, MINUTE_MS};
    use ab_04_bit_channel::{BitChannelApi, ChannelError, QueryMode};
    use shared_types::{Classify, ErrorKind, KeyLayout, LookBack};
    use std::time::Duration;

    const MAX_SPREAD: Duration = Duration::from_secs(30 * 60);

    fn window() -> LookBack {
        LookBack::days(1)
    }

    /// Eight publish times `step_secs` apart, ending a minute ago.
    fn times(step_secs: i64) -> [i64; 8] {
        let start = now_millis() - MINUTE_MS - 7 * step_secs * 1_000;
        std::array::from_fn(|i| start + i as i64 * step_secs * 1_000)
    }

    // =========================================================================
    // EXTREMES
    // =========================================================================

    #[tokio::test]
    async fn test_all_true_guesses_read_ff_and_all_false_read_00() {
        for layout in [KeyLayout::IndexFirst, KeyLayout::MessageFirst] {
            let beacon = SimulatedBeacon::new(layout);
            beacon.transmit_byte(3, 0, 0xFF, times(10)).await;
            beacon.transmit_byte(3, 1, 0x00, times(10)).await;
            let services = beacon.services(QueryMode::Batched);

            let high = services
                .channel
                .resolve_byte(3, 0, window(), MAX_SPREAD)
                .await
                .unwrap();
            let low = services
                .channel
                .resolve_byte(3, 1, window(), MAX_SPREAD)
                .await
                .unwrap();
            assert_eq!(high.value, 0xFF, "layout {}", layout);
            assert_eq!(low.value, 0x00, "layout {}", layout);
        }
    }

    // =========================================================================
    // SPREAD GUARD
    // =========================================================================

    #[tokio::test]
    async fn test_coherent_byte_within_five_minutes() {
        let beacon = SimulatedBeacon::new(KeyLayout::IndexFirst);
        let published = times(40);
        beacon.transmit_byte(0, 0, 0x4B, published).await;

        let byte = beacon
            .services(QueryMode::Batched)
            .channel
            .resolve_byte(0, 0, window(), MAX_SPREAD)
            .await
            .unwrap();

        assert_eq!(byte.value, 0x4B);
        assert!(byte.spread <= Duration::from_secs(5 * 60));
        assert_eq!(byte.spread, Duration::from_secs(7 * 40));
        assert_eq!(byte.report_time.timestamp_millis(), published[7]);
    }

    #[tokio::test]
    async fn test_late_false_guess_makes_byte_stale() {
        let beacon = SimulatedBeacon::new(KeyLayout::IndexFirst);
        let published = times(40);
        beacon.transmit_byte(0, 0, 0x4B, published).await;
        // Bit position 1 (index 1) is set in 0x4B; its false guess shows up 40 minutes later.
        beacon
            .transmit_bit(0, 1, false, published[1] + 40 * MINUTE_MS)
            .await;

        let err = beacon
            .services(QueryMode::Batched)
            .channel
            .resolve_byte(0, 0, window(), MAX_SPREAD)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::StaleData);
        assert!(err.is_retryable());
        match err {
            ChannelError::StaleData {
                value,
                spread,
                max_spread,
                byte,
                ..
            } => {
                assert_eq!(value, 0x0B);
                assert_eq!(byte.value, 0x0B);
                assert!(spread > max_spread);
            }
            other => panic!("expected stale data, got {other:?}"),
        }
    }

    // =========================================================================
    // ROUND TRIP
    // =========================================================================

    #[tokio::test]
    async fn test_every_byte_value_round_trips() {
        let beacon = SimulatedBeacon::new(KeyLayout::IndexFirst);
        for value in 0..=u8::MAX {
            beacon
                .transmit_byte(u32::from(value), 0, value, times(5))
                .await;
        }

        let services = beacon.services(QueryMode::Batched);
        for value in 0..=u8::MAX {
            let byte = services
                .channel
                .resolve_byte(u32::from(value), 0, window(), MAX_SPREAD)
                .await
                .unwrap();
            assert_eq!(byte.value, value);
        }
    }

    #[tokio::test]
    async fn test_per_id_mode_agrees_with_batched() {
        let beacon = SimulatedBeacon::new(KeyLayout::MessageFirst);
        beacon.transmit_byte(5, 0, 0xA7, times(15)).await;

        let batched = beacon
            .services(QueryMode::Batched)
            .channel
            .resolve_byte(5, 0, window(), MAX_SPREAD)
            .await
            .unwrap();
        let queries_before = beacon.provider.query_count();

        let per_id = beacon
            .services(QueryMode::PerId)
            .channel
            .resolve_byte(5, 0, window(), MAX_SPREAD)
            .await
            .unwrap();

        assert_eq!(batched, per_id);
        assert_eq!(beacon.provider.query_count() - queries_before, 16);
    }

    #[tokio::test]
    async fn test_two_byte_message() {
        let beacon = SimulatedBeacon::new(KeyLayout::IndexFirst);
        beacon.transmit_byte(2, 0, 0xD4, times(20)).await;
        beacon.transmit_byte(2, 1, 0x89, times(20)).await;

        let bytes = beacon
            .services(QueryMode::Batched)
            .channel
            .resolve_bytes(2, 2, window(), MAX_SPREAD)
            .await
            .unwrap();
        let values: Vec<u8> = bytes.iter().map(|b| b.value).collect();
        assert_eq!(values, vec![0xD4, 0x89]);
    }

    // =========================================================================
    // MISSING REPORTS
    // =========================================================================

    #[tokio::test]
    async fn test_unreported_message_is_no_report() {
        let beacon = SimulatedBeacon::new(KeyLayout::IndexFirst);
        beacon.transmit_byte(1, 0, 0x10, times(10)).await;

        let err = beacon
            .services(QueryMode::Batched)
            .channel
            .resolve_byte(1, 1, window(), MAX_SPREAD)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NoReport);
        assert!(matches!(
            err,
            ChannelError::NoReport {
                message_id: 1,
                byte_index: 1,
                bit_index: 8,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_reports_outside_window_are_ignored() {
        let beacon = SimulatedBeacon::new(KeyLayout::IndexFirst);
        let three_days_ago = now_millis() - 3 * 24 * 60 * MINUTE_MS;
        beacon
            .transmit_byte(0, 0, 0x42, std::array::from_fn(|i| three_days_ago + i as i64))
            .await;

        let err = beacon
            .services(QueryMode::Batched)
            .channel
            .resolve_byte(0, 0, window(), MAX_SPREAD)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoReport);
    }
}
