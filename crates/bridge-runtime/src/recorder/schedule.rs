//! # Polling Schedule
//!
//! The recorder works through a fixed seven-round rotation, sleeping a random
//! interval before each round. The manual message is polled twice per
//! rotation because it matters more than the environment telemetry.

use super::readings::Sensor;
use rand::Rng;
use std::fmt;
use std::time::Duration;

/// What one round polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Location,
    Sensor(Sensor),
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Task::Location => f.write_str("location"),
            Task::Sensor(sensor) => sensor.fmt(f),
        }
    }
}

/// One full rotation of rounds.
pub const ROTATION: [Task; 7] = [
    Task::Location,
    Task::Sensor(Sensor::Temperature),
    Task::Sensor(Sensor::Humidity),
    Task::Sensor(Sensor::ManualMessage),
    Task::Sensor(Sensor::Pressure),
    Task::Sensor(Sensor::BtDeviceCount),
    Task::Sensor(Sensor::ManualMessage),
];

/// Task of round number `round`.
pub fn task_for_round(round: u64) -> Task {
    ROTATION[(round % ROTATION.len() as u64) as usize]
}

/// Uniformly random delay in `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jitter {
    pub min: Duration,
    pub max: Duration,
}

impl Jitter {
    pub fn new(min: Duration, max: Duration) -> Self {
        Self { min, max }
    }

    /// Sleep before each recorder round: 3 to 5 minutes.
    pub fn between_rounds() -> Self {
        Self::new(Duration::from_secs(3 * 60), Duration::from_secs(5 * 60))
    }

    /// Sleep between per-id report queries: 10 to 17 seconds.
    pub fn between_queries() -> Self {
        Self::new(Duration::from_secs(10), Duration::from_secs(17))
    }

    /// Draw one delay. A degenerate range yields `min`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.max <= self.min {
            return self.min;
        }
        rng.gen_range(self.min..self.max)
    }
}
