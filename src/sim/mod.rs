/// Operator alerts raised during a run.
pub mod alert;
/// Simulation clock for step management.
pub mod clock;
pub mod controller;
pub mod engine;
pub mod kpi;
/// Admissible intake speed bounds.
pub mod limits;
pub mod storage;
/// Transport delay between intake and storage.
pub mod transport;
pub mod types;
