//! Price-aware raw water intake controller simulated over one day.
//!
//! Water pumped at the intake reaches the storage tank after a transport
//! delay. The controller picks an intake speed each step, running at the
//! maximum admissible speed ahead of an electricity price rise and at the
//! minimum safe speed otherwise.

pub mod config;
pub mod error;
pub mod forecast;
pub mod io;
pub mod reporting;
pub mod runner;
/// Simulation engine, controller, transport and storage modules.
pub mod sim;
pub mod tariff;

pub use config::{ConfigError, ScenarioConfig};
pub use error::{ReportError, SimError};
pub use runner::{run_scenario, run_simulation, run_with_controller};
