//! # Outbound Ports (Driven Ports)
//!
//! The external service that stores crowd-sourced reports.

use crate::domain::errors::QueryError;
use crate::domain::wire::ReportRequest;
use async_trait::async_trait;
use shared_types::Report;

/// Report provider (Driven Port).
///
/// Returns every report it holds for the requested ids, unfiltered and in
/// any order. Filtering and de-duplication happen in the service.
#[async_trait]
pub trait ReportProvider: Send + Sync {
    async fn query(&self, request: &ReportRequest) -> Result<Vec<Report>, QueryError>;
}

#[async_trait]
impl<T: ReportProvider + ?Sized> ReportProvider for std::sync::Arc<T> {
    async fn query(&self, request: &ReportRequest) -> Result<Vec<Report>, QueryError> {
        (**self).query(request).await
    }
}
