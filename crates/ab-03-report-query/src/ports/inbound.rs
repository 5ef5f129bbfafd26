//! # Inbound Ports (Driving Ports / API)

use crate::domain::errors::QueryError;
use async_trait::async_trait;
use shared_types::{LookBack, LookupId, Report};
use std::collections::HashMap;

/// Report lookup used by the bit and location channels.
#[async_trait]
pub trait ReportQueryApi: Send + Sync {
    /// Latest usable report for each id that has one, in a single provider call.
    ///
    /// Ids without a usable report are absent from the map.
    async fn fetch(
        &self,
        ids: &[LookupId],
        look_back: LookBack,
    ) -> Result<HashMap<LookupId, Report>, QueryError>;

    /// Every usable report of one id within the window, newest first.
    async fn fetch_all(&self, id: &LookupId, look_back: LookBack)
        -> Result<Vec<Report>, QueryError>;

    /// Latest usable report for one id. Lets callers pace requests themselves.
    async fn fetch_one(
        &self,
        id: &LookupId,
        look_back: LookBack,
    ) -> Result<Option<Report>, QueryError> {
        let mut found = self.fetch(std::slice::from_ref(id), look_back).await?;
        Ok(found.remove(id))
    }
}
