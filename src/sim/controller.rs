//! Intake speed controllers.

use serde::{Deserialize, Serialize};

use super::clock::Minutes;
use super::limits::SpeedLimiter;
use super::types::{ControlMode, SimParams};
use crate::forecast::{DemandForecaster, DemandProfile};
use crate::tariff::{PriceOracle, PriceTrend, TariffTable};

/// Everything the controller sees when deciding one step.
#[derive(Debug, Clone, Copy)]
pub struct ControlInput {
    /// Current step time.
    pub time: Minutes,
    /// Demand rate served during this step.
    pub demand: f64,
    /// Flow arriving in storage during this step.
    pub supply_now: f64,
    /// Volume decided earlier that is still in the pipe after this step.
    pub in_transit: f64,
    /// Inventory at the start of the step.
    pub inventory: f64,
}

/// Result of one control decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    /// Target intake speed for the step.
    pub speed: f64,
    pub mode: ControlMode,
    pub min_speed: f64,
    pub max_speed: f64,
    pub trend: PriceTrend,
}

impl Decision {
    /// The safety line cannot be kept without overflowing.
    pub fn is_infeasible(&self) -> bool {
        self.min_speed > self.max_speed
    }
}

/// Policy deciding the intake speed for each step.
///
/// Implementations must be deterministic: the driver relies on identical
/// inputs yielding identical decisions.
pub trait Controller {
    fn decide_speed(&self, input: &ControlInput) -> Decision;
}

/// Selects which intake policy a run uses.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerKind {
    /// Max speed ahead of a price rise, min speed otherwise.
    #[default]
    Predictive,
    /// Always min speed; the cost baseline.
    MinSpeed,
}

/// Price-aware intake controller.
///
/// Every decision only affects storage once the transport delay has passed,
/// so the controller plans against the inventory projected for that moment
/// and the demand forecast from then on.
#[derive(Debug, Clone)]
pub struct IntakeController {
    kind: ControllerKind,
    forecaster: DemandForecaster,
    oracle: PriceOracle,
    limiter: SpeedLimiter,
    step: Minutes,
    lead: Minutes,
    delay: Minutes,
}

impl IntakeController {
    /// Creates a controller for validated `params`.
    ///
    /// # Panics
    ///
    /// Panics if `params.step_minutes` is zero. Use
    /// [`Engine::with_controller`](super::engine::Engine::with_controller)
    /// to build one only after validation.
    pub fn new(
        kind: ControllerKind,
        params: &SimParams,
        profile: &DemandProfile,
        tariff: &TariffTable,
    ) -> Self {
        Self {
            kind,
            forecaster: DemandForecaster::new(profile.clone(), params.step_minutes),
            oracle: PriceOracle::new(tariff.clone(), params.step_minutes),
            limiter: SpeedLimiter::new(
                params.storage_capacity,
                params.safety_line,
                params.intake_ceiling,
            ),
            step: params.step_minutes,
            lead: params.forecast_lead_minutes,
            delay: params.transport_delay_minutes,
        }
    }

    pub fn kind(&self) -> ControllerKind {
        self.kind
    }

    /// Inventory projected for the moment this step's intake reaches storage.
    ///
    /// Starts from the current inventory, adds this step's net flow and the
    /// volume still in transit, and removes the demand forecast for the rest
    /// of the transport delay.
    pub fn inventory_in_control(&self, input: &ControlInput) -> f64 {
        let step_hours = f64::from(self.step) / 60.0;
        let remaining = self.delay.saturating_sub(self.step);
        let pending_demand = if remaining == 0 {
            0.0
        } else {
            self.forecaster.forecast_demand(input.time + self.step, remaining)
                * f64::from(remaining)
                / 60.0
        };
        input.inventory + (input.supply_now - input.demand) * step_hours + input.in_transit
            - pending_demand
    }

    /// Demand expected once this step's intake arrives.
    pub fn demand_in_control(&self, t: Minutes) -> f64 {
        self.forecaster.forecast_demand(t + self.delay, self.lead)
    }
}

impl Controller for IntakeController {
    fn decide_speed(&self, input: &ControlInput) -> Decision {
        let inventory = self.inventory_in_control(input);
        let demand = self.demand_in_control(input.time);
        let trend = self.oracle.price_trend(input.time, self.lead + self.delay);

        let min_speed = self.limiter.min_speed(demand, inventory);
        let max_speed = self.limiter.max_speed(demand, inventory);

        let mode = match (self.kind, trend) {
            (ControllerKind::Predictive, PriceTrend::Rising) => ControlMode::MaxSpeed,
            _ => ControlMode::MinSpeed,
        };
        let speed = match mode {
            ControlMode::MaxSpeed => max_speed,
            _ => min_speed,
        };

        Decision {
            speed,
            mode,
            min_speed,
            max_speed,
            trend,
        }
    }
}
