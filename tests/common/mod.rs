//! Shared test fixtures for integration tests.
#![allow(dead_code)]

use intake_sim::config::ScenarioConfig;
use intake_sim::forecast::DemandProfile;
use intake_sim::sim::controller::{ControlInput, Controller, Decision};
use intake_sim::sim::engine::Engine;
use intake_sim::sim::types::{ControlMode, SimParams, TimeSeries};
use intake_sim::tariff::{PriceTrend, TariffTable};

/// Peak season parameters (10 min step, 60 min lead and delay).
pub fn peak_params() -> SimParams {
    ScenarioConfig::peak_season().params
}

pub fn peak_profile() -> DemandProfile {
    ScenarioConfig::peak_season()
        .demand_profile()
        .expect("peak season demand is valid")
}

pub fn peak_tariff() -> TariffTable {
    ScenarioConfig::peak_season()
        .tariff_table()
        .expect("peak season tariff is valid")
}

pub fn flat_tariff() -> TariffTable {
    ScenarioConfig::flat_tariff()
        .tariff_table()
        .expect("flat tariff is valid")
}

/// Controller that ignores storage and prices and pumps at a fixed speed.
pub struct FixedSpeed(pub f64);

impl Controller for FixedSpeed {
    fn decide_speed(&self, _input: &ControlInput) -> Decision {
        Decision {
            speed: self.0,
            mode: ControlMode::Fixed,
            min_speed: 0.0,
            max_speed: self.0,
            trend: PriceTrend::Flat,
        }
    }
}

/// Runs the peak season day with a fixed intake speed.
pub fn run_fixed(params: SimParams, speed: f64) -> TimeSeries {
    Engine::new(params, peak_profile(), peak_tariff(), FixedSpeed(speed))
        .expect("engine should build")
        .run()
        .expect("run should succeed")
}
