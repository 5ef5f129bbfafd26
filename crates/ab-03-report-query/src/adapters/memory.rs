//! # In-Memory Report Provider
//!
//! Holds published reports in a map and answers queries from it. Used to
//! replay captured reports and to drive the channels in tests.

use crate::domain::errors::QueryError;
use crate::domain::wire::ReportRequest;
use crate::ports::outbound::ReportProvider;
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use shared_types::{LookupId, Report};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// Report provider backed by memory.
///
/// Unlike a real provider it applies the look-back window against the
/// current wall clock, so reports published in the future are always returned.
#[derive(Default)]
pub struct InMemoryReportProvider {
    reports: RwLock<HashMap<LookupId, Vec<Report>>>,
    queries: AtomicUsize,
}

impl InMemoryReportProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a report under its lookup id. Duplicates are kept, as a real
    /// provider would.
    pub async fn publish(&self, report: Report) {
        self.reports
            .write()
            .await
            .entry(report.lookup_id.clone())
            .or_default()
            .push(report);
    }

    /// Store many reports.
    pub async fn publish_all(&self, reports: impl IntoIterator<Item = Report>) {
        let mut map = self.reports.write().await;
        for report in reports {
            map.entry(report.lookup_id.clone()).or_default().push(report);
        }
    }

    /// Number of `query` calls served so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::Relaxed)
    }

    pub async fn clear(&self) {
        self.reports.write().await.clear();
    }
}

#[async_trait]
impl ReportProvider for InMemoryReportProvider {
    async fn query(&self, request: &ReportRequest) -> Result<Vec<Report>, QueryError> {
        self.queries.fetch_add(1, Ordering::Relaxed);

        let cutoff = (Utc::now() - ChronoDuration::days(i64::from(request.days))).timestamp_millis();
        let map = self.reports.read().await;

        Ok(request
            .ids
            .iter()
            .filter_map(|id| map.get(id))
            .flatten()
            .filter(|r| r.published_at_millis >= cutoff || r.published_at_millis <= 1)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::LookBack;

    fn report(id: &str, published_at_millis: i64) -> Report {
        Report {
            lookup_id: LookupId::from_encoded(id),
            payload: vec![1],
            published_at_millis,
        }
    }

    #[tokio::test]
    async fn test_returns_only_requested_ids() {
        let provider = InMemoryReportProvider::new();
        let now = Utc::now().timestamp_millis();
        provider
            .publish_all(vec![report("a", now), report("b", now), report("a", now - 1)])
            .await;

        let request = ReportRequest::new(&[LookupId::from_encoded("a")], LookBack::days(1));
        let out = provider.query(&request).await.unwrap();

        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|r| r.lookup_id.as_str() == "a"));
        assert_eq!(provider.query_count(), 1);
    }

    #[tokio::test]
    async fn test_look_back_window_applies() {
        let provider = InMemoryReportProvider::new();
        let three_days_ago = (Utc::now() - ChronoDuration::days(3)).timestamp_millis();
        provider.publish(report("a", three_days_ago)).await;

        let id = [LookupId::from_encoded("a")];
        assert!(provider
            .query(&ReportRequest::new(&id, LookBack::days(1)))
            .await
            .unwrap()
            .is_empty());
        assert_eq!(
            provider
                .query(&ReportRequest::new(&id, LookBack::days(7)))
                .await
                .unwrap()
                .len(),
            1
        );
    }
}
