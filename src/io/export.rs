//! CSV and JSON export for simulation time series.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::error::ReportError;
use crate::sim::types::TimeSeries;

/// Column header for CSV telemetry export.
const HEADER: &str = "time_min,time_hr,intake,supply,inventory,demand,price,\
                      min_speed,max_speed,mode,trend";

/// Exports a time series to a CSV file at the given path.
///
/// Writes a header row followed by one data row per step. Produces
/// deterministic output for identical inputs.
///
/// # Errors
///
/// Returns a `ReportError` if file creation or writing fails.
pub fn export_csv(series: &TimeSeries, path: &Path) -> Result<(), ReportError> {
    let file = File::create(path)?;
    write_csv(series, io::BufWriter::new(file))
}

/// Writes a time series as CSV to any writer.
///
/// # Errors
///
/// Returns a `ReportError` if writing fails.
pub fn write_csv(series: &TimeSeries, writer: impl Write) -> Result<(), ReportError> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for s in &series.samples {
        wtr.write_record(&[
            s.time.to_string(),
            format!("{:.4}", s.time_hours()),
            format!("{:.6}", s.intake),
            format!("{:.6}", s.supply),
            format!("{:.6}", s.inventory),
            format!("{:.6}", s.demand),
            format!("{:.4}", s.price),
            format!("{:.6}", s.min_speed),
            format!("{:.6}", s.max_speed),
            s.mode.to_string(),
            s.trend.signum().to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports the full series, alerts included, as pretty-printed JSON.
///
/// # Errors
///
/// Returns a `ReportError` if file creation or serialization fails.
pub fn export_json(series: &TimeSeries, path: &Path) -> Result<(), ReportError> {
    let file = File::create(path)?;
    write_json(series, io::BufWriter::new(file))
}

/// Writes the full series as JSON to any writer.
///
/// # Errors
///
/// Returns a `ReportError` if serialization or writing fails.
pub fn write_json(series: &TimeSeries, mut writer: impl Write) -> Result<(), ReportError> {
    serde_json::to_writer_pretty(&mut writer, series)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
