use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use intake_sim::sim::controller::ControllerKind;

/// Simulates one day of a price-aware raw water intake.
///
/// If no --scenario or --preset is given, the peak_season preset is used.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Load scenario from a TOML config file.
    #[clap(long, conflicts_with = "preset")]
    pub scenario: Option<PathBuf>,

    /// Use a built-in preset (peak_season, flat_tariff, tight_storage).
    #[clap(long)]
    pub preset: Option<String>,

    /// Override the controller selected by the scenario.
    #[clap(long, value_enum)]
    pub controller: Option<ControllerArg>,

    /// Export step results to CSV.
    #[clap(long)]
    pub telemetry_out: Option<PathBuf>,

    /// Export the full series and alert log to JSON.
    #[clap(long)]
    pub json_out: Option<PathBuf>,

    /// Print only alerts and the KPI report.
    #[clap(long, short)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ControllerArg {
    Predictive,
    #[value(name = "min_speed")]
    MinSpeed,
}

impl From<ControllerArg> for ControllerKind {
    fn from(arg: ControllerArg) -> Self {
        match arg {
            ControllerArg::Predictive => Self::Predictive,
            ControllerArg::MinSpeed => Self::MinSpeed,
        }
    }
}
