//! Output sinks for a completed simulation.

use std::io::{self, Write};
use std::path::PathBuf;

use tracing::info;

use crate::error::ReportError;
use crate::io::export::{export_csv, export_json};
use crate::sim::kpi::KpiReport;
use crate::sim::types::TimeSeries;

/// Destination for a finished time series.
///
/// The runner calls `render` exactly once, after the engine has completed.
pub trait ReportSink {
    /// # Errors
    ///
    /// Returns a `ReportError` if the output cannot be written.
    fn render(&mut self, series: &TimeSeries) -> Result<(), ReportError>;
}

/// Per-step table followed by the KPI report.
pub struct ConsoleReport<W: Write> {
    out: W,
    quiet: bool,
}

impl ConsoleReport<io::Stdout> {
    pub fn stdout(quiet: bool) -> Self {
        Self::new(io::stdout(), quiet)
    }
}

impl<W: Write> ConsoleReport<W> {
    /// With `quiet` set only the KPI report and alert log are written.
    pub fn new(out: W, quiet: bool) -> Self {
        Self { out, quiet }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for ConsoleReport<W> {
    fn render(&mut self, series: &TimeSeries) -> Result<(), ReportError> {
        if !self.quiet {
            for sample in &series.samples {
                writeln!(self.out, "{sample}")?;
            }
            writeln!(self.out)?;
        }

        if !series.alerts.is_empty() {
            writeln!(self.out, "--- Alerts ---")?;
            for alert in &series.alerts {
                writeln!(self.out, "{alert}")?;
            }
            writeln!(self.out)?;
        }

        writeln!(self.out, "{}", KpiReport::from_series(series))?;
        self.out.flush()?;
        Ok(())
    }
}

/// Writes the step table to a CSV file.
pub struct CsvReport {
    path: PathBuf,
}

impl CsvReport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReportSink for CsvReport {
    fn render(&mut self, series: &TimeSeries) -> Result<(), ReportError> {
        export_csv(series, &self.path)?;
        info!(path = %self.path.display(), "telemetry written");
        Ok(())
    }
}

/// Writes the whole series, alerts included, to a JSON file.
pub struct JsonReport {
    path: PathBuf,
}

impl JsonReport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReportSink for JsonReport {
    fn render(&mut self, series: &TimeSeries) -> Result<(), ReportError> {
        export_json(series, &self.path)?;
        info!(path = %self.path.display(), "json report written");
        Ok(())
    }
}

/// Renders to each sink in order, stopping at the first failure.
impl ReportSink for Vec<Box<dyn ReportSink>> {
    fn render(&mut self, series: &TimeSeries) -> Result<(), ReportError> {
        for sink in self.iter_mut() {
            sink.render(series)?;
        }
        Ok(())
    }
}
