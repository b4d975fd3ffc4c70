//! Entry points that wire configuration, engine and reporting together.

use tracing::info;

use crate::config::ScenarioConfig;
use crate::error::SimError;
use crate::forecast::DemandProfile;
use crate::reporting::ReportSink;
use crate::sim::controller::{ControllerKind, IntakeController};
use crate::sim::engine::Engine;
use crate::sim::types::{SimParams, TimeSeries};
use crate::tariff::TariffTable;

/// Runs one day with the predictive controller.
///
/// # Errors
///
/// Returns `SimError::InvalidConfig` if `params` fail validation.
///
/// # Examples
///
/// ```
/// use intake_sim::config::ScenarioConfig;
/// use intake_sim::runner::run_simulation;
///
/// let cfg = ScenarioConfig::peak_season();
/// let series = run_simulation(
///     &cfg.params,
///     &cfg.demand_profile().unwrap(),
///     &cfg.tariff_table().unwrap(),
/// )
/// .unwrap();
/// assert_eq!(series.len(), 143);
/// ```
pub fn run_simulation(
    params: &SimParams,
    profile: &DemandProfile,
    tariff: &TariffTable,
) -> Result<TimeSeries, SimError> {
    run_with_controller(params, profile, tariff, ControllerKind::Predictive)
}

/// Runs one day with the selected controller.
///
/// # Errors
///
/// Returns `SimError::InvalidConfig` if `params` fail validation.
pub fn run_with_controller(
    params: &SimParams,
    profile: &DemandProfile,
    tariff: &TariffTable,
    kind: ControllerKind,
) -> Result<TimeSeries, SimError> {
    let mut engine = Engine::with_controller(
        params.clone(),
        profile.clone(),
        tariff.clone(),
        |p, d, t| IntakeController::new(kind, p, d, t),
    )?;
    engine.run()
}

/// Validates `config`, runs it and renders the series to `sink` once.
///
/// # Errors
///
/// Returns `SimError::InvalidConfig` listing every violation, or
/// `SimError::Report` if the sink fails.
pub fn run_scenario<S>(config: &ScenarioConfig, sink: &mut S) -> Result<TimeSeries, SimError>
where
    S: ReportSink + ?Sized,
{
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(SimError::InvalidConfig(errors));
    }

    let profile = config.demand_profile()?;
    let tariff = config.tariff_table()?;
    let kind = config.simulation.controller;
    info!(controller = ?kind, "running scenario");

    let series = run_with_controller(&config.params, &profile, &tariff, kind)?;
    sink.render(&series)?;
    Ok(series)
}
