//! Core simulation types: parameters, per-step samples, and the output series.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::alert::Alert;
use super::clock::{MINUTES_PER_DAY, Minutes};
use crate::config::ConfigError;
use crate::tariff::PriceTrend;

/// Longest forecast lead or transport delay, one day.
///
/// Keeps every look-ahead time (`t + delay + lead`) within three days.
pub const MAX_HORIZON_MINUTES: Minutes = MINUTES_PER_DAY;

/// Immutable parameter bundle for one simulation run.
///
/// Volumes share one unit (10,000 m³ in the built-in presets); speeds are
/// that unit per hour.
///
/// # Examples
///
/// ```
/// use intake_sim::sim::types::SimParams;
///
/// let params = SimParams::default();
/// assert!(params.validate().is_empty());
/// assert_eq!(params.total_steps(), 143);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimParams {
    /// Simulation step Δt in minutes; must divide one day.
    pub step_minutes: Minutes,
    /// Length of the demand window the controller plans for; at most one day.
    pub forecast_lead_minutes: Minutes,
    /// Delay between intake and arrival in storage; a multiple of the step,
    /// at most one day.
    pub transport_delay_minutes: Minutes,
    /// Maximum inventory.
    pub storage_capacity: f64,
    /// Inventory at midnight.
    pub initial_inventory: f64,
    /// Inventory the minimum intake speed aims to preserve.
    pub safety_line: f64,
    /// Inventory below which a low-inventory alert is raised (0 disables).
    pub alert_threshold: f64,
    /// Physical pump ceiling.
    pub intake_ceiling: f64,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            step_minutes: 10,
            forecast_lead_minutes: 60,
            transport_delay_minutes: 60,
            storage_capacity: 2.0,
            initial_inventory: 0.8,
            safety_line: 1.0,
            alert_threshold: 0.5,
            intake_ceiling: 2.0,
        }
    }
}

impl SimParams {
    /// Number of steps in one simulated day.
    pub fn total_steps(&self) -> usize {
        if self.step_minutes == 0 {
            return 0;
        }
        ((MINUTES_PER_DAY - 1) / self.step_minutes) as usize
    }

    /// Step length in hours.
    pub fn step_hours(&self) -> f64 {
        f64::from(self.step_minutes) / 60.0
    }

    /// Validates all fields and returns every violation found.
    ///
    /// Returns an empty vector if the parameters are usable.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.step_minutes == 0 {
            errors.push(ConfigError::new("step_minutes", "must be > 0"));
        } else {
            if MINUTES_PER_DAY % self.step_minutes != 0 {
                errors.push(ConfigError::new(
                    "step_minutes",
                    format!("must divide {MINUTES_PER_DAY}"),
                ));
            }
            if self.transport_delay_minutes % self.step_minutes != 0 {
                errors.push(ConfigError::new(
                    "transport_delay_minutes",
                    "must be a multiple of step_minutes",
                ));
            }
        }
        for (field, value) in [
            ("forecast_lead_minutes", self.forecast_lead_minutes),
            ("transport_delay_minutes", self.transport_delay_minutes),
        ] {
            if value == 0 {
                errors.push(ConfigError::new(field, "must be > 0"));
            } else if value > MAX_HORIZON_MINUTES {
                errors.push(ConfigError::new(
                    field,
                    format!("must be <= {MAX_HORIZON_MINUTES}"),
                ));
            }
        }

        for (field, value) in [
            ("storage_capacity", self.storage_capacity),
            ("safety_line", self.safety_line),
            ("intake_ceiling", self.intake_ceiling),
        ] {
            if !(value.is_finite() && value > 0.0) {
                errors.push(ConfigError::new(field, "must be a finite value > 0"));
            }
        }
        for (field, value) in [
            ("initial_inventory", self.initial_inventory),
            ("alert_threshold", self.alert_threshold),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                errors.push(ConfigError::new(field, "must be a finite value >= 0"));
            }
        }
        if self.initial_inventory > self.storage_capacity {
            errors.push(ConfigError::new(
                "initial_inventory",
                "must be <= storage_capacity",
            ));
        }

        errors
    }
}

/// Which bound the controller selected for a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlMode {
    MaxSpeed,
    MinSpeed,
    /// Set by a controller that ignores both bounds.
    Fixed,
}

impl fmt::Display for ControlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MaxSpeed => "max",
            Self::MinSpeed => "min",
            Self::Fixed => "fixed",
        })
    }
}

/// Complete record of one simulation step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepSample {
    /// Step time in minutes since midnight.
    pub time: Minutes,
    /// Intake speed decided for this step.
    pub intake: f64,
    /// Flow arriving in storage during this step.
    pub supply: f64,
    /// Inventory at the start of the step.
    pub inventory: f64,
    /// Demand rate served during the step.
    pub demand: f64,
    /// Tariff in effect.
    pub price: f64,
    /// Lower admissible speed for the decision.
    pub min_speed: f64,
    /// Upper admissible speed for the decision.
    pub max_speed: f64,
    pub mode: ControlMode,
    pub trend: PriceTrend,
}

impl StepSample {
    /// Simulation time in hours.
    pub fn time_hours(&self) -> f64 {
        f64::from(self.time) / 60.0
    }
}

impl fmt::Display for StepSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02} | intake={:>6.3} ({}, bounds {:.3}..{:.3})  supply={:>6.3} | \
             inventory={:>6.3}  demand={:>6.3} | price={:.4} trend={:>2}",
            self.time / 60,
            self.time % 60,
            self.intake,
            self.mode,
            self.min_speed,
            self.max_speed,
            self.supply,
            self.inventory,
            self.demand,
            self.price,
            self.trend.signum(),
        )
    }
}

/// Output of a completed run: one sample per step plus the alert log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    /// Step size the series was produced with.
    pub step_minutes: Minutes,
    pub samples: Vec<StepSample>,
    pub alerts: Vec<Alert>,
    /// Inventory after the last step, at the end of the day.
    pub end_inventory: f64,
}

impl TimeSeries {
    pub fn with_capacity(step_minutes: Minutes, steps: usize) -> Self {
        Self {
            step_minutes,
            samples: Vec::with_capacity(steps),
            alerts: Vec::new(),
            end_inventory: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample recorded at minute `time`, if that was a step time.
    pub fn sample_at(&self, time: Minutes) -> Option<&StepSample> {
        self.samples.iter().find(|s| s.time == time)
    }

    /// Number of alerts whose kind carries `label` (see
    /// [`AlertKind::label`](super::alert::AlertKind::label)).
    pub fn alert_count(&self, label: &str) -> usize {
        self.alerts
            .iter()
            .filter(|a| a.kind.label() == label)
            .count()
    }
}
