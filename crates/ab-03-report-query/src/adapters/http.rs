//! # HTTP Report Provider
//!
//! POSTs `{ids, days}` as JSON to the provider address and parses `{results}`.

use crate::domain::errors::QueryError;
use crate::domain::wire::{ReportRequest, ReportResponse};
use crate::ports::outbound::ReportProvider;
use async_trait::async_trait;
use reqwest::Client;
use shared_types::Report;
use std::time::Duration;
use tracing::{debug, instrument};

/// Address of a locally running report provider.
pub const DEFAULT_REPORT_ADDR: &str = "http://localhost:6176/";

/// Per-request timeout unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Report provider reached over HTTP.
pub struct HttpReportProvider {
    client: Client,
    endpoint: String,
}

impl HttpReportProvider {
    /// Create a provider with the default timeout.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, QueryError> {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    /// Create a provider whose requests fail after `timeout`.
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, QueryError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| QueryError::Client(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ReportProvider for HttpReportProvider {
    #[instrument(skip(self, request), fields(ids = request.ids.len(), days = request.days))]
    async fn query(&self, request: &ReportRequest) -> Result<Vec<Report>, QueryError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| QueryError::Connection {
                endpoint: self.endpoint.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(QueryError::Status {
                status: status.as_u16(),
                ids: request.ids.len(),
            });
        }

        let body: ReportResponse = response
            .json()
            .await
            .map_err(|e| QueryError::Decode(e.to_string()))?;

        debug!("[ab-03] provider returned {} results", body.results.len());
        Ok(body.into_reports())
    }
}
