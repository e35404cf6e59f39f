use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Floor area each occupant is budgeted, in m²
pub const AREA_PER_OCCUPANT_M2: f64 = 4.0;

/// Purpose of a room; parameterises occupancy behaviour
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RoomCategory {
    /// Open-plan or private offices
    Office,
    /// Bookable meeting and conference rooms
    Meeting,
    /// Pantries, break rooms and cafés
    Pantry,
    /// Entrance and reception areas
    Lobby,
    /// Elevators, stairs and service shafts
    Core,
    /// Vehicle parking; people are not modelled here
    Parking,
}

/// A single room on a floor plan.
///
/// Coordinates are the room centre in metres relative to the floor centre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomConfig {
    pub id: String,
    pub category: RoomCategory,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub z: f64,
    pub width: f64,
    pub depth: f64,
    #[serde(default)]
    pub label: String,
}

impl RoomConfig {
    pub fn new(
        id: impl Into<String>,
        category: RoomCategory,
        x: f64,
        z: f64,
        width: f64,
        depth: f64,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            x,
            z,
            width,
            depth,
            label: label.into(),
        }
    }

    /// Floor area in m²
    pub fn area_m2(&self) -> f64 {
        self.width * self.depth
    }

    /// Maximum number of occupants: one per [`AREA_PER_OCCUPANT_M2`], floored
    pub fn max_capacity(&self) -> u32 {
        let capacity = (self.area_m2() / AREA_PER_OCCUPANT_M2).floor();
        if capacity.is_finite() && capacity > 0.0 {
            capacity as u32
        } else {
            0
        }
    }

    pub(crate) fn has_valid_geometry(&self) -> bool {
        self.width.is_finite() && self.depth.is_finite() && self.width >= 0.0 && self.depth >= 0.0
    }
}
