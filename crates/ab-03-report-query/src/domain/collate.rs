//! # Report Collation
//!
//! Turns the provider's raw result list into at most one effective report per
//! lookup id.

use shared_types::{LookupId, Report};
use std::collections::HashMap;
use tracing::trace;

/// Drop "no data" sentinels and keep the latest report per id.
///
/// On equal publish times the report seen last in `reports` wins.
pub fn collate(reports: impl IntoIterator<Item = Report>) -> HashMap<LookupId, Report> {
    let mut latest: HashMap<LookupId, Report> = HashMap::new();

    for report in reports {
        if !report.is_usable() {
            trace!(
                "[ab-03] dropping sentinel report for {} (published {})",
                report.lookup_id,
                report.published_at_millis
            );
            continue;
        }

        match latest.get(&report.lookup_id) {
            Some(existing) if existing.published_at_millis > report.published_at_millis => {}
            _ => {
                latest.insert(report.lookup_id.clone(), report);
            }
        }
    }

    latest
}

/// Drop "no data" sentinels and order the rest newest first. Keeps duplicates.
pub fn usable_newest_first(reports: impl IntoIterator<Item = Report>) -> Vec<Report> {
    let mut usable: Vec<Report> = reports.into_iter().filter(Report::is_usable).collect();
    usable.sort_by(|a, b| b.published_at_millis.cmp(&a.published_at_millis));
    usable
}
