//! Top-level run configuration.

use cab_core::{Credits, Tick};

use crate::{SimError, SimResult};

/// Top-level simulation configuration.
///
/// Typically loaded from a JSON file by the application crate (with the
/// `serde` feature) and passed to [`SimBuilder`][crate::SimBuilder].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Total ticks to simulate.  One tick is one minute: 1440 is a day.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Chance per tick that a new fare calls for service.
    pub fare_probability: f64,

    /// Price offered per unit of straight-line trip distance.
    pub fare_price_per_distance: Credits,

    /// Ticks an uncollected fare waits before giving up.
    pub abandon_after: u64,

    /// Ticks a fare stays open for bids before it is allocated.
    pub allocation_delay: u64,

    /// Report a snapshot every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            total_ticks:             1440,
            seed:                    42,
            fare_probability:        0.1,
            fare_price_per_distance: 20,
            abandon_after:           60,
            allocation_delay:        1,
            output_interval_ticks:   60,
        }
    }
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    pub fn validate(&self) -> SimResult<()> {
        if !(0.0..=1.0).contains(&self.fare_probability) {
            return Err(SimError::Config(format!(
                "fare_probability must be within [0, 1], got {}",
                self.fare_probability
            )));
        }
        if self.fare_price_per_distance < 0 {
            return Err(SimError::Config(format!(
                "fare_price_per_distance must not be negative, got {}",
                self.fare_price_per_distance
            )));
        }
        Ok(())
    }
}
