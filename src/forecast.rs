//! Demand forecasting from a fixed diurnal consumption profile.

use serde::Serialize;

use crate::config::ConfigError;
use crate::sim::clock::{Minutes, hour_of_day};

/// Hourly entries in a diurnal table.
pub const HOURS_PER_DAY: usize = 24;

/// Consumption rate for each hour of the day, repeated every day.
///
/// Rates are volume per hour and are never negative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemandProfile {
    rates: [f64; HOURS_PER_DAY],
}

impl DemandProfile {
    /// Builds a profile from exactly 24 finite, non-negative hourly rates.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the offending entry if the table has
    /// the wrong length or holds a negative or non-finite value.
    pub fn new(rates: &[f64]) -> Result<Self, ConfigError> {
        let rates: [f64; HOURS_PER_DAY] = rates.try_into().map_err(|_| {
            ConfigError::new(
                "demand",
                format!("must have exactly {HOURS_PER_DAY} entries, got {}", rates.len()),
            )
        })?;
        if let Some(hour) = rates.iter().position(|r| !r.is_finite() || *r < 0.0) {
            return Err(ConfigError::new(
                format!("demand[{hour}]"),
                "must be a finite value >= 0",
            ));
        }
        Ok(Self { rates })
    }

    /// Rate for the hour containing minute `t`.
    pub fn rate_at(&self, t: Minutes) -> f64 {
        self.rates[hour_of_day(t)]
    }

    /// All hourly rates, midnight first.
    pub fn rates(&self) -> &[f64; HOURS_PER_DAY] {
        &self.rates
    }
}

/// Forecasts average demand over arbitrary windows by sampling the profile
/// once per simulation step.
#[derive(Debug, Clone)]
pub struct DemandForecaster {
    profile: DemandProfile,
    step: Minutes,
}

impl DemandForecaster {
    /// Creates a forecaster sampling `profile` every `step` minutes.
    ///
    /// # Panics
    ///
    /// Panics if `step` is zero.
    pub fn new(profile: DemandProfile, step: Minutes) -> Self {
        assert!(step > 0, "step must be > 0");
        Self { profile, step }
    }

    /// Average demand rate expected over `[t, t + duration)`.
    ///
    /// The window is cut into `duration / step` slices (floor division) and
    /// the profile rate at each slice start is averaged. A window shorter
    /// than one step is a single slice starting at `t`.
    ///
    /// # Arguments
    ///
    /// * `t` - Window start; may lie past midnight
    /// * `duration` - Window length in minutes
    pub fn forecast_demand(&self, t: Minutes, duration: Minutes) -> f64 {
        let slices = (duration / self.step).max(1);
        let total: f64 = (0..slices)
            .map(|i| self.profile.rate_at(t + i * self.step))
            .sum();
        total / f64::from(slices)
    }

    /// Step size used for slicing, in minutes.
    pub fn step(&self) -> Minutes {
        self.step
    }

    pub fn profile(&self) -> &DemandProfile {
        &self.profile
    }
}
