//! Intake simulator entry point: CLI wiring and config-driven runs.

mod cli;

use std::process;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use intake_sim::config::ScenarioConfig;
use intake_sim::reporting::{ConsoleReport, CsvReport, JsonReport, ReportSink};
use intake_sim::runner::run_scenario;

use crate::cli::Args;

const DEFAULT_PRESET: &str = "peak_season";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("intake_sim=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // --scenario takes priority, then --preset, then the default preset
    let loaded = match (&args.scenario, &args.preset) {
        (Some(path), _) => ScenarioConfig::from_toml_file(path),
        (None, Some(name)) => ScenarioConfig::from_preset(name),
        (None, None) => ScenarioConfig::from_preset(DEFAULT_PRESET),
    };
    let mut scenario = match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    if let Some(controller) = args.controller {
        scenario.simulation.controller = controller.into();
    }

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let mut sinks: Vec<Box<dyn ReportSink>> = vec![Box::new(ConsoleReport::stdout(args.quiet))];
    if let Some(path) = args.telemetry_out {
        sinks.push(Box::new(CsvReport::new(path)));
    }
    if let Some(path) = args.json_out {
        sinks.push(Box::new(JsonReport::new(path)));
    }

    run_scenario(&scenario, &mut sinks).context("simulation failed")?;
    Ok(())
}
