//! # Query Pacing
//!
//! Randomized pause between per-id report queries, for providers that
//! throttle bursts of lookups.

use crate::recorder::schedule::Jitter;
use ab_04_bit_channel::Pacer;
use async_trait::async_trait;
use tracing::trace;

/// `Pacer` that sleeps a uniformly random interval.
#[derive(Debug, Clone, Copy)]
pub struct RandomizedPacer {
    jitter: Jitter,
}

impl RandomizedPacer {
    pub fn new(jitter: Jitter) -> Self {
        Self { jitter }
    }
}

impl Default for RandomizedPacer {
    fn default() -> Self {
        Self::new(Jitter::between_queries())
    }
}

#[async_trait]
impl Pacer for RandomizedPacer {
    async fn pause(&self) {
        let delay = self.jitter.sample(&mut rand::thread_rng());
        trace!("[runtime] pacing next query by {:?}", delay);
        tokio::time::sleep(delay).await;
    }
}
