//! Simulation engine that steps one day through forecast, control, transport
//! and storage.

use tracing::{debug, info, warn};

use super::alert::{Alert, AlertKind};
use super::clock::{DayClock, Minutes};
use super::controller::{ControlInput, Controller};
use super::storage::Storage;
use super::transport::IntakeHistory;
use super::types::{SimParams, StepSample, TimeSeries};
use crate::error::SimError;
use crate::forecast::{DemandForecaster, DemandProfile};
use crate::tariff::{PriceOracle, TariffTable};

/// Lifecycle of an [`Engine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Running,
    Completed,
}

/// Simulation driver owning the parameters, profiles and controller.
///
/// Generic over `C: Controller` for static dispatch. An engine runs exactly
/// once; build a new one for another run.
pub struct Engine<C: Controller> {
    params: SimParams,
    forecaster: DemandForecaster,
    oracle: PriceOracle,
    storage: Storage,
    controller: C,
    state: EngineState,
}

impl<C: Controller> Engine<C> {
    /// Creates an idle engine.
    ///
    /// # Errors
    ///
    /// Returns `SimError::InvalidConfig` listing every invalid parameter.
    pub fn new(
        params: SimParams,
        profile: DemandProfile,
        tariff: TariffTable,
        controller: C,
    ) -> Result<Self, SimError> {
        Self::with_controller(params, profile, tariff, |_, _, _| controller)
    }

    /// Creates an idle engine whose controller is built from the validated
    /// inputs, for controllers that cannot be constructed from invalid ones.
    ///
    /// # Errors
    ///
    /// Returns `SimError::InvalidConfig` listing every invalid parameter;
    /// `build` is not called in that case.
    pub fn with_controller<F>(
        params: SimParams,
        profile: DemandProfile,
        tariff: TariffTable,
        build: F,
    ) -> Result<Self, SimError>
    where
        F: FnOnce(&SimParams, &DemandProfile, &TariffTable) -> C,
    {
        let errors = params.validate();
        if !errors.is_empty() {
            return Err(SimError::InvalidConfig(errors));
        }

        let controller = build(&params, &profile, &tariff);
        Ok(Self {
            forecaster: DemandForecaster::new(profile, params.step_minutes),
            oracle: PriceOracle::new(tariff, params.step_minutes),
            storage: Storage::new(params.storage_capacity),
            controller,
            state: EngineState::Idle,
            params,
        })
    }

    /// Runs the whole day and returns the output series.
    ///
    /// Steps are strictly sequential: each decision is recorded before the
    /// next step looks back into the intake history.
    ///
    /// # Errors
    ///
    /// Returns `SimError::InvalidState` unless the engine is idle.
    pub fn run(&mut self) -> Result<TimeSeries, SimError> {
        if self.state != EngineState::Idle {
            return Err(SimError::InvalidState(self.state));
        }
        self.state = EngineState::Running;

        let step = self.params.step_minutes;
        let mut clock = DayClock::new(step);
        let mut history = IntakeHistory::new(step, self.params.transport_delay_minutes);
        let mut series = TimeSeries::with_capacity(step, clock.total_steps());
        let mut inventory = self.params.initial_inventory;

        info!(
            steps = clock.total_steps(),
            step_minutes = step,
            initial_inventory = inventory,
            "starting simulation"
        );

        while let Some(t) = clock.tick() {
            let demand = self.forecaster.forecast_demand(t, step);
            let supply = history.supply_arriving_at(t, demand);
            let input = ControlInput {
                time: t,
                demand,
                supply_now: supply,
                in_transit: history.in_transit_volume(t, demand),
                inventory,
            };

            let decision = self.controller.decide_speed(&input);
            if decision.is_infeasible() {
                raise(
                    &mut series,
                    t,
                    AlertKind::InfeasibleBounds {
                        min_speed: decision.min_speed,
                        max_speed: decision.max_speed,
                    },
                );
            }

            history.record(decision.speed);
            series.samples.push(StepSample {
                time: t,
                intake: decision.speed,
                supply,
                inventory,
                demand,
                price: self.oracle.price_at(t),
                min_speed: decision.min_speed,
                max_speed: decision.max_speed,
                mode: decision.mode,
                trend: decision.trend,
            });
            debug!(time = t, intake = decision.speed, supply, inventory, "step");

            let update = self
                .storage
                .advance_inventory(inventory, supply, demand, step);
            if update.overflowed() {
                raise(
                    &mut series,
                    t,
                    AlertKind::Overflow {
                        excess: update.overflow,
                    },
                );
            }
            if update.depleted() {
                raise(
                    &mut series,
                    t,
                    AlertKind::Depletion {
                        shortfall: update.shortfall,
                    },
                );
            } else if update.inventory < self.params.alert_threshold {
                raise(
                    &mut series,
                    t,
                    AlertKind::LowInventory {
                        inventory: update.inventory,
                        threshold: self.params.alert_threshold,
                    },
                );
            }
            inventory = update.inventory;
        }

        series.end_inventory = inventory;
        self.state = EngineState::Completed;
        info!(
            steps = series.len(),
            alerts = series.alerts.len(),
            final_inventory = inventory,
            "simulation completed"
        );
        Ok(series)
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }
}

fn raise(series: &mut TimeSeries, time: Minutes, kind: AlertKind) {
    let alert = Alert { time, kind };
    warn!(time, kind = kind.label(), "{alert}");
    series.alerts.push(alert);
}
