use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Thermal comfort band for an air temperature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ComfortIndex {
    /// Below 18 °C
    TooCold,
    /// 18 °C up to (not including) 20 °C
    SlightlyCold,
    /// 20 °C to 24 °C inclusive
    Comfortable,
    /// Above 24 °C up to 26 °C inclusive
    SlightlyWarm,
    /// Above 26 °C
    TooHot,
}

impl ComfortIndex {
    /// Band for `temperature` in °C; `None` for a non-finite reading
    pub fn classify(temperature: f64) -> Option<Self> {
        if !temperature.is_finite() {
            return None;
        }

        let index = if temperature < 18.0 {
            ComfortIndex::TooCold
        } else if temperature < 20.0 {
            ComfortIndex::SlightlyCold
        } else if temperature <= 24.0 {
            ComfortIndex::Comfortable
        } else if temperature <= 26.0 {
            ComfortIndex::SlightlyWarm
        } else {
            ComfortIndex::TooHot
        };

        Some(index)
    }

    pub fn is_comfortable(&self) -> bool {
        matches!(self, ComfortIndex::Comfortable)
    }
}
