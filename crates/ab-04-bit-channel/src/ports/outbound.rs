//! # Outbound Ports (Driven Ports)

use async_trait::async_trait;

/// Delay between consecutive per-id report queries.
///
/// Pacing policy belongs to the caller; the channel only calls `pause`
/// between two requests, never before the first.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self);
}

/// No delay at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

#[async_trait]
impl Pacer for NoPacing {
    async fn pause(&self) {}
}
