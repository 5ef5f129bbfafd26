//! # Report Query Subsystem (AB-03)
//!
//! Fetches the latest crowd-sourced report for each of a set of lookup ids.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): wire format and report collation, no I/O
//! - **Ports Layer** (`ports/`): `ReportQueryApi` (inbound) and `ReportProvider` (outbound)
//! - **Adapters Layer** (`adapters/`): HTTP provider and an in-memory provider
//! - **Service Layer** (`service.rs`): `ReportQuery`, provider call plus collation
//!
//! ## Contract
//!
//! - Reports with an empty payload or a publish time of 0/1 are dropped.
//! - Duplicate ids keep the report with the greatest publish time, except in
//!   `fetch_all`, which returns every usable report of one id newest first.
//! - No internal retry. Transport failures reach the caller unchanged.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::http::{HttpReportProvider, DEFAULT_REPORT_ADDR, DEFAULT_TIMEOUT};
pub use adapters::memory::InMemoryReportProvider;
pub use domain::collate::{collate, usable_newest_first};
pub use domain::errors::QueryError;
pub use domain::wire::{ReportRequest, ReportResponse, WireReport};
pub use ports::inbound::ReportQueryApi;
pub use ports::outbound::ReportProvider;
pub use service::ReportQuery;
