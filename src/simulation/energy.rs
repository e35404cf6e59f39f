//! # Energy Model
//!
//! Building power draw split by end use, from time of day, aggregate
//! occupancy and the current temperature.
//!
//! HVAC demand is proportional to the deviation from a 22 °C setpoint plus a
//! per-occupant load. Cooling runs above the setpoint, heating below 20 °C;
//! between the two is a comfort deadband where neither is active.
//!
//! Lighting uses the lower base value at night (`t > 18` or `t < 7`) and the
//! higher one during the day, independent of daylight or occupancy.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::error::first_non_finite;
use super::SimulationError;

/// Power draw per end use, in kW
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EnergyBreakdown {
    pub cooling: f64,
    pub heating: f64,
    pub lighting: f64,
    pub equipment: f64,
    pub hot_water: f64,
}

impl EnergyBreakdown {
    /// Sum of all end uses in kW
    pub fn total_kw(&self) -> f64 {
        self.cooling + self.heating + self.lighting + self.equipment + self.hot_water
    }
}

/// Energy model coefficients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct EnergyModelConfig {
    /// Standby draw, always present
    #[validate(range(min = 0.0))]
    pub base_load_kw: f64,
    #[validate(range(min = 0.0))]
    pub day_lighting_kw: f64,
    #[validate(range(min = 0.0))]
    pub night_lighting_kw: f64,
    /// Night lighting applies strictly after this hour...
    #[validate(range(min = 0.0, max = 24.0))]
    pub night_after_hour: f64,
    /// ...and strictly before this one
    #[validate(range(min = 0.0, max = 24.0))]
    pub night_before_hour: f64,
    /// Cooling is active above this temperature
    pub setpoint_c: f64,
    /// Heating is active below this temperature
    pub heating_threshold_c: f64,
    #[validate(range(min = 0.0))]
    pub hvac_kw_per_degree: f64,
    #[validate(range(min = 0.0))]
    pub hvac_kw_per_occupant: f64,
    #[validate(range(min = 0.0))]
    pub lighting_kw_per_occupant: f64,
    #[validate(range(min = 0.0))]
    pub equipment_kw_per_occupant: f64,
    #[validate(range(min = 0.0))]
    pub hot_water_kw_per_occupant: f64,
}

impl Default for EnergyModelConfig {
    fn default() -> Self {
        Self {
            base_load_kw: 100.0,
            day_lighting_kw: 500.0,
            night_lighting_kw: 200.0,
            night_after_hour: 18.0,
            night_before_hour: 7.0,
            setpoint_c: 22.0,
            heating_threshold_c: 20.0,
            hvac_kw_per_degree: 50.0,
            hvac_kw_per_occupant: 10.0,
            lighting_kw_per_occupant: 5.0,
            equipment_kw_per_occupant: 20.0,
            hot_water_kw_per_occupant: 2.0,
        }
    }
}

impl EnergyModelConfig {
    /// Every coefficient finite, range checks plus deadband ordering
    pub fn check(&self) -> Result<(), SimulationError> {
        if let Some((field, value)) = first_non_finite(&[
            ("base_load_kw", self.base_load_kw),
            ("day_lighting_kw", self.day_lighting_kw),
            ("night_lighting_kw", self.night_lighting_kw),
            ("night_after_hour", self.night_after_hour),
            ("night_before_hour", self.night_before_hour),
            ("setpoint_c", self.setpoint_c),
            ("heating_threshold_c", self.heating_threshold_c),
            ("hvac_kw_per_degree", self.hvac_kw_per_degree),
            ("hvac_kw_per_occupant", self.hvac_kw_per_occupant),
            ("lighting_kw_per_occupant", self.lighting_kw_per_occupant),
            ("equipment_kw_per_occupant", self.equipment_kw_per_occupant),
            ("hot_water_kw_per_occupant", self.hot_water_kw_per_occupant),
        ]) {
            return Err(SimulationError::InvalidConfig(format!(
                "energy.{field} must be finite, got {value}"
            )));
        }
        self.validate()?;

        if self.heating_threshold_c > self.setpoint_c {
            return Err(SimulationError::InvalidConfig(format!(
                "heating threshold ({}°C) must not exceed the cooling setpoint ({}°C)",
                self.heating_threshold_c, self.setpoint_c
            )));
        }

        Ok(())
    }
}

/// Time-of-day energy model
#[derive(Debug, Clone, Default)]
pub struct EnergyModel {
    config: EnergyModelConfig,
}

impl EnergyModel {
    pub fn new(config: EnergyModelConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EnergyModelConfig {
        &self.config
    }

    /// Whether `t` falls in the night lighting window
    pub fn is_night(&self, t: f64) -> bool {
        t > self.config.night_after_hour || t < self.config.night_before_hour
    }

    /// Power breakdown for `occupancy` people at `temperature` °C and time `t`.
    ///
    /// Every component is non-negative. A non-finite temperature produces no
    /// HVAC load.
    pub fn compute(&self, t: f64, occupancy: u32, temperature: f64) -> EnergyBreakdown {
        let cfg = &self.config;
        let people = occupancy as f64;

        let lighting_base = if self.is_night(t) {
            cfg.night_lighting_kw
        } else {
            cfg.day_lighting_kw
        };

        let hvac_demand = (cfg.setpoint_c - temperature).abs() * cfg.hvac_kw_per_degree
            + people * cfg.hvac_kw_per_occupant;

        EnergyBreakdown {
            cooling: if temperature > cfg.setpoint_c { hvac_demand } else { 0.0 },
            heating: if temperature < cfg.heating_threshold_c { hvac_demand } else { 0.0 },
            lighting: lighting_base + people * cfg.lighting_kw_per_occupant,
            equipment: cfg.base_load_kw + people * cfg.equipment_kw_per_occupant,
            hot_water: people * cfg.hot_water_kw_per_occupant,
        }
    }
}

/// [`EnergyModel::compute`] with the default coefficients
pub fn compute_energy(t: f64, occupancy: u32, temperature: f64) -> EnergyBreakdown {
    EnergyModel::default().compute(t, occupancy, temperature)
}
