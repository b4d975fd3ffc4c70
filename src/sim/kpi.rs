//! Post-hoc KPI computation from simulation results.

use std::fmt;

use serde::Serialize;

use super::types::{ControlMode, TimeSeries};

/// Aggregate key performance indicators derived from a complete simulation run.
///
/// Computed post-hoc from the [`TimeSeries`] so reported metrics always agree
/// with the step data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiReport {
    pub steps: usize,
    /// Total volume taken in over the day.
    pub intake_volume: f64,
    /// Total demand volume over the day.
    pub demand_volume: f64,
    /// Sum of intake volume times the price in effect.
    pub pumping_cost: f64,
    /// Volume-weighted price paid for intake (0 if nothing was pumped).
    pub mean_price: f64,
    pub min_inventory: f64,
    pub max_inventory: f64,
    /// Inventory at the end of the day, after the last step.
    pub final_inventory: f64,
    /// Fraction of steps run at the maximum admissible speed.
    pub max_speed_share: f64,
    pub overflow_count: usize,
    pub depletion_count: usize,
    pub infeasible_count: usize,
    pub low_inventory_count: usize,
}

impl KpiReport {
    /// Computes all KPIs from a finished series.
    pub fn from_series(series: &TimeSeries) -> Self {
        let step_hours = f64::from(series.step_minutes) / 60.0;

        let mut intake_volume = 0.0;
        let mut demand_volume = 0.0;
        let mut pumping_cost = 0.0;
        let mut min_inventory = f64::INFINITY;
        let mut max_inventory = f64::NEG_INFINITY;
        let mut max_steps = 0_usize;

        for s in &series.samples {
            let volume = s.intake * step_hours;
            intake_volume += volume;
            demand_volume += s.demand * step_hours;
            pumping_cost += volume * s.price;
            min_inventory = min_inventory.min(s.inventory);
            max_inventory = max_inventory.max(s.inventory);
            if s.mode == ControlMode::MaxSpeed {
                max_steps += 1;
            }
        }

        if series.is_empty() {
            min_inventory = 0.0;
            max_inventory = 0.0;
        }

        let mean_price = if intake_volume > 0.0 {
            pumping_cost / intake_volume
        } else {
            0.0
        };
        let max_speed_share = if series.is_empty() {
            0.0
        } else {
            max_steps as f64 / series.len() as f64
        };

        Self {
            steps: series.len(),
            intake_volume,
            demand_volume,
            pumping_cost,
            mean_price,
            min_inventory,
            max_inventory,
            final_inventory: series.end_inventory,
            max_speed_share,
            overflow_count: series.alert_count("overflow"),
            depletion_count: series.alert_count("depletion"),
            infeasible_count: series.alert_count("infeasible_bounds"),
            low_inventory_count: series.alert_count("low_inventory"),
        }
    }
}

impl fmt::Display for KpiReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- KPI Report ---")?;
        writeln!(f, "Steps:                 {}", self.steps)?;
        writeln!(f, "Intake volume:         {:.4}", self.intake_volume)?;
        writeln!(f, "Demand volume:         {:.4}", self.demand_volume)?;
        writeln!(
            f,
            "Pumping cost:          {:.4} (mean price {:.4})",
            self.pumping_cost, self.mean_price
        )?;
        writeln!(
            f,
            "Inventory:             min {:.4}  max {:.4}  final {:.4}",
            self.min_inventory, self.max_inventory, self.final_inventory
        )?;
        writeln!(f, "Max-speed steps:       {:.1}%", 100.0 * self.max_speed_share)?;
        write!(
            f,
            "Alerts:                {} overflow, {} depletion, {} infeasible, {} low inventory",
            self.overflow_count, self.depletion_count, self.infeasible_count, self.low_inventory_count
        )
    }
}
