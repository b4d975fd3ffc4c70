//! Error types shared across the simulator.

use thiserror::Error;

use crate::config::ConfigError;
use crate::sim::engine::EngineState;

/// Errors that stop a simulation from starting or from being reported.
///
/// Operational conditions during a run (overflow, depletion, infeasible
/// bounds) are never errors; they are recorded as alerts in the output.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid configuration: {}", join_config_errors(.0))]
    InvalidConfig(Vec<ConfigError>),

    #[error("engine must be idle to run, found {0:?}")]
    InvalidState(EngineState),

    #[error("report failed: {0}")]
    Report(#[from] ReportError),
}

impl From<ConfigError> for SimError {
    fn from(error: ConfigError) -> Self {
        Self::InvalidConfig(vec![error])
    }
}

/// Errors raised while rendering a completed time series.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

fn join_config_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
