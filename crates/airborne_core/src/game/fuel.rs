//! Fuel gauge bookkeeping
//!
//! The gauge is a clamped scalar in `[0, 1]`. It drains in proportion to
//! distance flown and refills by a fixed amount per pickup collected.

use crate::config::FuelConfig;

/// Player fuel gauge
#[derive(Debug, Clone)]
pub struct FuelGauge {
    level: f32,
    drain_per_unit: f32,
    pickup_refill: f32,
    low_threshold: f32,
}

impl FuelGauge {
    /// Create a gauge from configuration
    #[must_use]
    pub fn new(config: &FuelConfig) -> Self {
        Self {
            level: config.initial_level.clamp(0.0, 1.0),
            drain_per_unit: config.drain_per_unit,
            pickup_refill: config.pickup_refill,
            low_threshold: config.low_threshold,
        }
    }

    /// Current level in `[0, 1]`
    #[must_use]
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Drain the gauge for a frame of flight at `speed` units per second
    pub fn drain(&mut self, speed: f32, dt: f32) {
        let distance = speed.abs() * dt;
        self.level = (self.level - distance * self.drain_per_unit).max(0.0);
    }

    /// Refill the gauge by one pickup's worth
    pub fn refill(&mut self) {
        self.level = (self.level + self.pickup_refill).min(1.0);
    }

    /// True once the gauge has run completely dry
    #[must_use]
    pub fn is_depleted(&self) -> bool {
        self.level <= 0.0
    }

    /// True while the gauge sits below the low-fuel threshold
    #[must_use]
    pub fn is_low(&self) -> bool {
        self.level < self.low_threshold
    }
}
