//! # Report Provider Wire Format
//!
//! ```text
//! request:  {"ids": ["<base64 sha256>", ...], "days": 1}
//! response: {"results": [{"datePublished": 1700000000000, "payload": "<base64>",
//!                         "description": "found", "id": "<base64 sha256>", "statusCode": 0}]}
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use shared_types::{LookBack, LookupId, Report};
use tracing::warn;

/// Body of a report query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub ids: Vec<LookupId>,
    pub days: u32,
}

impl ReportRequest {
    pub fn new(ids: &[LookupId], look_back: LookBack) -> Self {
        Self {
            ids: ids.to_vec(),
            days: look_back.as_days(),
        }
    }
}

/// Body of a report query response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportResponse {
    #[serde(default)]
    pub results: Vec<WireReport>,
}

/// One report as serialized by the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireReport {
    #[serde(default)]
    pub date_published: i64,
    #[serde(default)]
    pub payload: String,
    #[serde(default)]
    pub description: String,
    pub id: LookupId,
    #[serde(default)]
    pub status_code: i64,
}

impl WireReport {
    /// Convert to the domain shape.
    ///
    /// A payload that is not valid base64 becomes empty, which makes the
    /// report unusable and lets collation drop it.
    pub fn into_report(self) -> Report {
        let payload = match STANDARD.decode(self.payload.as_bytes()) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("[ab-03] undecodable payload for {}: {}", self.id, e);
                Vec::new()
            }
        };
        Report {
            lookup_id: self.id,
            payload,
            published_at_millis: self.date_published,
        }
    }
}

impl ReportResponse {
    pub fn into_reports(self) -> Vec<Report> {
        self.results.into_iter().map(WireReport::into_report).collect()
    }
}
