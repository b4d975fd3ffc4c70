//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::forecast::{DemandProfile, HOURS_PER_DAY};
use crate::sim::controller::ControllerKind;
use crate::sim::types::SimParams;
use crate::tariff::TariffTable;

/// Hourly demand of the peak season day (10,000 m³/h).
const PEAK_SEASON_DEMAND: [f64; HOURS_PER_DAY] = [
    0.262, 0.262, 0.262, 0.262, 0.262, 0.262, 0.931, 1.6, 1.6, 0.931, 0.262, 0.931, 1.6, 0.262,
    0.262, 0.262, 0.262, 1.6, 1.6, 1.6, 1.6, 1.6, 0.262, 0.262,
];

/// Hourly electricity tariff of the peak season day.
const PEAK_SEASON_TARIFF: [f64; HOURS_PER_DAY] = [
    0.2695, 0.2695, 0.2695, 0.2695, 0.2695, 0.2695, 0.2695, 0.5615, 0.5615, 0.8366, 0.8366, 0.8366,
    0.8366, 0.8366, 0.8366, 0.5615, 0.5615, 0.5615, 0.5615, 0.5615, 1.0107, 1.0107, 0.5615, 0.2695,
];

/// Constant price used by the `flat_tariff` preset.
const FLAT_PRICE: f64 = 0.5615;

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"params.step_minutes"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Nests the field path under `section`.
    #[must_use]
    pub fn within(self, section: &str) -> Self {
        Self {
            field: format!("{section}.{}", self.field),
            message: self.message,
        }
    }
}

/// Top-level scenario configuration parsed from TOML.
///
/// Every section is optional and defaults to the `peak_season` preset. Load
/// from TOML with [`ScenarioConfig::from_toml_file`] or pick a preset with
/// [`ScenarioConfig::from_preset`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Run-level options.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Physical and timing parameters.
    #[serde(default)]
    pub params: SimParams,
    /// Hourly demand and tariff tables.
    #[serde(default)]
    pub profile: ProfileConfig,
}

/// Run-level options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Controller type: `"predictive"` or `"min_speed"`.
    pub controller: ControllerKind,
}

/// Hourly tables, each with exactly 24 entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileConfig {
    /// Demand rate per hour of day.
    pub demand: Vec<f64>,
    /// Electricity price per hour of day.
    pub tariff: Vec<f64>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            demand: PEAK_SEASON_DEMAND.to_vec(),
            tariff: PEAK_SEASON_TARIFF.to_vec(),
        }
    }
}

impl ScenarioConfig {
    /// Returns the peak season preset.
    pub fn peak_season() -> Self {
        Self::default()
    }

    /// Returns the flat-tariff preset: peak season demand, constant price.
    pub fn flat_tariff() -> Self {
        Self {
            profile: ProfileConfig {
                tariff: vec![FLAT_PRICE; HOURS_PER_DAY],
                ..ProfileConfig::default()
            },
            ..Self::default()
        }
    }

    /// Returns the tight-storage preset: a smaller tank with the same demand.
    pub fn tight_storage() -> Self {
        Self {
            params: SimParams {
                storage_capacity: 1.5,
                initial_inventory: 0.8,
                safety_line: 1.0,
                alert_threshold: 0.4,
                ..SimParams::default()
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["peak_season", "flat_tariff", "tight_storage"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "peak_season" => Ok(Self::peak_season()),
            "flat_tariff" => Ok(Self::flat_tariff()),
            "tight_storage" => Ok(Self::tight_storage()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new(
                "scenario",
                format!("cannot read \"{}\": {e}", path.display()),
            )
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors: Vec<ConfigError> = self
            .params
            .validate()
            .into_iter()
            .map(|e| e.within("params"))
            .collect();

        if let Err(e) = self.demand_profile() {
            errors.push(e.within("profile"));
        }
        if let Err(e) = self.tariff_table() {
            errors.push(e.within("profile"));
        }

        errors
    }

    /// Builds the demand profile from the `[profile]` table.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the table is not 24 finite values `>= 0`.
    pub fn demand_profile(&self) -> Result<DemandProfile, ConfigError> {
        DemandProfile::new(&self.profile.demand)
    }

    /// Builds the tariff table from the `[profile]` table.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the table is not 24 finite values `> 0`.
    pub fn tariff_table(&self) -> Result<TariffTable, ConfigError> {
        TariffTable::new(&self.profile.tariff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_season_preset_valid() {
        let errors = ScenarioConfig::peak_season().validate();
        assert!(errors.is_empty(), "peak_season should be valid: {errors:?}");
    }

    #[test]
    fn from_preset_unknown() {
        let err = ScenarioConfig::from_preset("nonexistent");
        assert!(err.as_ref().is_err_and(|e| e.message.contains("unknown preset")));
        assert_eq!(err.err().map(|e| e.field), Some("preset".to_string()));
    }

    #[test]
    fn all_presets_are_valid() {
        for name in ScenarioConfig::PRESETS {
            let cfg = ScenarioConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[simulation]
controller = "min_speed"

[params]
step_minutes = 20
forecast_lead_minutes = 120
transport_delay_minutes = 40
storage_capacity = 3.0
initial_inventory = 1.0
safety_line = 1.2
alert_threshold = 0.0
intake_ceiling = 2.5

[profile]
demand = [0.3, 0.3, 0.3, 0.3, 0.3, 0.3, 1.0, 1.5, 1.5, 1.0, 0.3, 1.0,
          1.5, 0.3, 0.3, 0.3, 0.3, 1.5, 1.5, 1.5, 1.5, 1.5, 0.3, 0.3]
tariff = [0.3, 0.3, 0.3, 0.3, 0.3, 0.3, 0.3, 0.6, 0.6, 0.8, 0.8, 0.8,
          0.8, 0.8, 0.8, 0.6, 0.6, 0.6, 0.6, 0.6, 1.0, 1.0, 0.6, 0.3]
"#;
        let cfg = ScenarioConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(
            cfg.as_ref().map(|c| c.simulation.controller),
            Some(ControllerKind::MinSpeed)
        );
        assert_eq!(cfg.as_ref().map(|c| c.params.step_minutes), Some(20));
        assert_eq!(
            cfg.as_ref().map(|c| c.validate().len()),
            Some(0),
            "parsed scenario should validate"
        );
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[params]
storage_capacity = 4.0
"#;
        let cfg = ScenarioConfig::from_toml_str(toml).ok();
        assert_eq!(cfg.as_ref().map(|c| c.params.storage_capacity), Some(4.0));
        // untouched fields keep the peak season values
        assert_eq!(cfg.as_ref().map(|c| c.params.step_minutes), Some(10));
        assert_eq!(
            cfg.as_ref().map(|c| c.profile.clone()),
            Some(ProfileConfig::default())
        );
        assert_eq!(
            cfg.as_ref().map(|c| c.simulation.controller),
            Some(ControllerKind::Predictive)
        );
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[params]
step_minutes = 10
bogus_field = true
"#;
        let result = ScenarioConfig::from_toml_str(toml);
        assert!(result.is_err_and(|e| e.field == "toml"));
    }

    #[test]
    fn unknown_controller_is_rejected_at_parse() {
        let toml = r#"
[simulation]
controller = "greedy"
"#;
        assert!(ScenarioConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn validation_prefixes_param_fields() {
        let mut cfg = ScenarioConfig::peak_season();
        cfg.params.step_minutes = 7;
        cfg.params.intake_ceiling = 0.0;
        let fields: Vec<_> = cfg.validate().into_iter().map(|e| e.field).collect();
        assert!(fields.iter().any(|f| f == "params.step_minutes"));
        assert!(fields.iter().any(|f| f == "params.intake_ceiling"));
    }

    #[test]
    fn validation_catches_short_tables() {
        let mut cfg = ScenarioConfig::peak_season();
        cfg.profile.demand.pop();
        cfg.profile.tariff[3] = 0.0;
        let fields: Vec<_> = cfg.validate().into_iter().map(|e| e.field).collect();
        assert!(fields.iter().any(|f| f == "profile.demand"));
        assert!(fields.iter().any(|f| f == "profile.tariff[3]"));
    }

    #[test]
    fn flat_tariff_differs_only_in_prices() {
        let peak = ScenarioConfig::peak_season();
        let flat = ScenarioConfig::flat_tariff();
        assert_eq!(peak.params, flat.params);
        assert_eq!(peak.profile.demand, flat.profile.demand);
        assert!(flat.profile.tariff.iter().all(|&p| p == FLAT_PRICE));
    }

    #[test]
    fn tight_storage_has_smaller_tank() {
        let peak = ScenarioConfig::peak_season();
        let tight = ScenarioConfig::tight_storage();
        assert!(tight.params.storage_capacity < peak.params.storage_capacity);
    }

    #[test]
    fn config_error_display() {
        let e = ConfigError::new("step_minutes", "must be > 0").within("params");
        assert_eq!(e.to_string(), "config error: params.step_minutes: must be > 0");
    }
}
