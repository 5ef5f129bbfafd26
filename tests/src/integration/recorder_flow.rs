//! # Recorder Flow
//!
//! Full runtime path: subsystems wired by the container, polled by the
//! recorder through a complete rotation, persisted to a record file.

#[cfg(test)]
mod tests {
    use crate::beacon::{fix_minutes_ago, now_millis, SimulatedBeacon, MINUTE_MS};
    use ab_03_report_query::InMemoryReportProvider;
    use ab_04_bit_channel::QueryMode;
    use bridge_runtime::container::{DataChannel, LocationTrail};
    use bridge_runtime::recorder::{Jitter, RecordKind, ROTATION};
    use bridge_runtime::{RecordStore, Recorder, RecorderSettings};
    use shared_types::{KeyLayout, LookBack};
    use std::path::Path;
    use std::time::Duration;

    type TestRecorder =
        Recorder<DataChannel<InMemoryReportProvider>, LocationTrail<InMemoryReportProvider>>;

    fn times(minutes_ago: i64) -> [i64; 8] {
        let start = now_millis() - minutes_ago * MINUTE_MS;
        std::array::from_fn(|i| start + i as i64 * 15_000)
    }

    fn recorder(beacon: &SimulatedBeacon, path: &Path) -> TestRecorder {
        let services = beacon.services(QueryMode::Batched);
        Recorder::new(
            services.channel,
            services.location,
            RecordStore::open(path).unwrap(),
            RecorderSettings {
                look_back: LookBack::days(1),
                max_bit_spread: Duration::from_secs(60 * 60),
                round_delay: Jitter::new(Duration::ZERO, Duration::ZERO),
            },
        )
    }

    async fn populate(beacon: &SimulatedBeacon) {
        beacon
            .report_location(&fix_minutes_ago(50, 20), now_millis() - 45 * MINUTE_MS)
            .await;
        beacon
            .report_location(&fix_minutes_ago(25, 30), now_millis() - 20 * MINUTE_MS)
            .await;
        beacon.transmit_byte(0, 0, 183, times(30)).await; // 21 °C
        beacon.transmit_byte(1, 0, 0x80, times(30)).await; // ~50 %
        beacon.transmit_byte(2, 0, 0xD4, times(30)).await; // ~1013 hPa
        beacon.transmit_byte(2, 1, 0x89, times(30)).await;
        beacon.transmit_byte(4, 0, 17, times(30)).await;
        beacon.transmit_byte(5, 0, 0x2A, times(30)).await;
    }

    async fn rotate(recorder: &mut TestRecorder) -> usize {
        let mut appended = 0;
        for round in 0..ROTATION.len() as u64 {
            appended += recorder.run_round(round).await.unwrap();
        }
        appended
    }

    #[tokio::test]
    async fn test_full_rotation_records_every_kind_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        let beacon = SimulatedBeacon::new(KeyLayout::IndexFirst);
        populate(&beacon).await;

        let mut recorder = recorder(&beacon, &path);
        assert_eq!(rotate(&mut recorder).await, 7);

        let store = RecordStore::open(&path).unwrap();
        let records = store.records();
        assert_eq!(records.len(), 7);
        assert_eq!(records.iter().filter_map(|r| r.temp_c).collect::<Vec<_>>(), vec![21.0]);
        assert_eq!(records.iter().filter_map(|r| r.bt_device_count).collect::<Vec<_>>(), vec![17]);
        assert_eq!(records.iter().filter_map(|r| r.manual_message).collect::<Vec<_>>(), vec![0x2A]);
        let pressure = records.iter().find_map(|r| r.pressure_hpa).unwrap();
        assert!((pressure - 1013.25).abs() < 0.02);
        let humidity = records.iter().find_map(|r| r.humidity_pct).unwrap();
        assert!((humidity - 50.196).abs() < 0.01);
        assert!(store.latest(RecordKind::Location).is_some());

        // Nothing new on the air: a second rotation appends nothing.
        assert_eq!(rotate(&mut recorder).await, 0);
    }

    #[tokio::test]
    async fn test_restart_resumes_from_record_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        let beacon = SimulatedBeacon::new(KeyLayout::IndexFirst);
        populate(&beacon).await;

        let mut first = recorder(&beacon, &path);
        assert_eq!(rotate(&mut first).await, 7);
        drop(first);

        // New manual message after the restart.
        beacon.transmit_byte(5, 0, 0x07, times(5)).await;

        let mut second = recorder(&beacon, &path);
        assert_eq!(second.store().records().len(), 7);
        assert_eq!(rotate(&mut second).await, 1);

        let manual: Vec<u8> = second
            .store()
            .records()
            .iter()
            .filter_map(|r| r.manual_message)
            .collect();
        assert_eq!(manual, vec![0x2A, 0x07]);
    }

    #[tokio::test]
    async fn test_failed_polls_do_not_stop_the_rotation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        let beacon = SimulatedBeacon::new(KeyLayout::IndexFirst);
        // Only the temperature is on the air.
        beacon.transmit_byte(0, 0, 120, times(10)).await;

        let mut recorder = recorder(&beacon, &path);
        assert_eq!(rotate(&mut recorder).await, 1);
        assert_eq!(recorder.store().records()[0].temp_c, Some(0.0));
    }
}
