use std::fmt;

use serde::Serialize;

use super::clock::Minutes;

/// Operator-visible condition raised during a run.
///
/// Alerts never stop the simulation; they are collected in the output
/// series and logged as they occur.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Alert {
    /// Step time at which the condition was detected.
    pub time: Minutes,
    #[serde(flatten)]
    pub kind: AlertKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlertKind {
    /// Inventory would have exceeded capacity; `excess` was spilled.
    Overflow { excess: f64 },
    /// Inventory would have gone negative; `shortfall` of demand went unserved.
    Depletion { shortfall: f64 },
    /// The minimum admissible speed exceeded the maximum.
    InfeasibleBounds { min_speed: f64, max_speed: f64 },
    /// Inventory ended the step below the alert threshold.
    LowInventory { inventory: f64, threshold: f64 },
}

impl AlertKind {
    /// Short machine-friendly label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Overflow { .. } => "overflow",
            Self::Depletion { .. } => "depletion",
            Self::InfeasibleBounds { .. } => "infeasible_bounds",
            Self::LowInventory { .. } => "low_inventory",
        }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02} ", self.time / 60, self.time % 60)?;
        match self.kind {
            AlertKind::Overflow { excess } => write!(f, "overflow, spilled {excess:.4}"),
            AlertKind::Depletion { shortfall } => {
                write!(f, "depletion, unserved demand {shortfall:.4}")
            }
            AlertKind::InfeasibleBounds {
                min_speed,
                max_speed,
            } => write!(
                f,
                "infeasible bounds, min speed {min_speed:.4} > max speed {max_speed:.4}"
            ),
            AlertKind::LowInventory {
                inventory,
                threshold,
            } => write!(
                f,
                "low inventory {inventory:.4} below threshold {threshold:.4}"
            ),
        }
    }
}
