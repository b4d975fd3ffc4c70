/// CSV and JSON export of a completed time series.
pub mod export;
