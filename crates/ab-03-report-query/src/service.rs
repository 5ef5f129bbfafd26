//! # Report Query Service
//!
//! Implements `ReportQueryApi` over any `ReportProvider`.

use crate::domain::collate::{collate, usable_newest_first};
use crate::domain::errors::QueryError;
use crate::domain::wire::ReportRequest;
use crate::ports::inbound::ReportQueryApi;
use crate::ports::outbound::ReportProvider;
use async_trait::async_trait;
use shared_types::{LookBack, LookupId, Report};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Report query service.
pub struct ReportQuery<P: ReportProvider> {
    provider: P,
}

impl<P: ReportProvider> ReportQuery<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

#[async_trait]
impl<P: ReportProvider> ReportQueryApi for ReportQuery<P> {
    async fn fetch(
        &self,
        ids: &[LookupId],
        look_back: LookBack,
    ) -> Result<HashMap<LookupId, Report>, QueryError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let request = ReportRequest::new(ids, look_back);
        let raw = self.provider.query(&request).await.map_err(|e| {
            warn!("[ab-03] query for {} ids failed: {}", ids.len(), e);
            e
        })?;

        let received = raw.len();
        let reports = collate(raw);
        debug!(
            "[ab-03] {} ids over {} days: {} raw results, {} effective",
            ids.len(),
            look_back.as_days(),
            received,
            reports.len()
        );
        Ok(reports)
    }

    async fn fetch_all(
        &self,
        id: &LookupId,
        look_back: LookBack,
    ) -> Result<Vec<Report>, QueryError> {
        let request = ReportRequest::new(std::slice::from_ref(id), look_back);
        let raw = self.provider.query(&request).await?;
        let received = raw.len();
        let reports: Vec<Report> = usable_newest_first(raw)
            .into_iter()
            .filter(|r| &r.lookup_id == id)
            .collect();
        debug!(
            "[ab-03] history of {}: {} raw results, {} usable",
            id,
            received,
            reports.len()
        );
        Ok(reports)
    }
}
