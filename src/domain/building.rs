//! Building topology: floors and the rooms on them.
//!
//! The twin only needs room ids, categories and capacities; positions are kept
//! so a presentation layer can draw the same layout the model was run against.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use super::room::{RoomCategory, RoomConfig};
use crate::simulation::SimulationError;

/// Footprint width of the reference building in metres
pub const BUILDING_WIDTH: f64 = 40.0;
/// Footprint depth of the reference building in metres
pub const BUILDING_DEPTH: f64 = 20.0;
/// Office floors above the ground floor in the reference building
pub const OFFICE_LEVELS: i32 = 4;

/// One storey of the building
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorConfig {
    pub level: i32,
    #[serde(default)]
    pub rooms: Vec<RoomConfig>,
    #[serde(default)]
    pub is_parking: bool,
}

/// Complete floor plan of a building
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingLayout {
    pub floors: Vec<FloorConfig>,
}

impl Default for BuildingLayout {
    fn default() -> Self {
        Self::standard()
    }
}

impl BuildingLayout {
    /// Build a layout from floors, rejecting duplicate ids and bad room geometry
    pub fn new(floors: Vec<FloorConfig>) -> Result<Self, SimulationError> {
        let layout = Self { floors };
        layout.check()?;
        Ok(layout)
    }

    /// The reference office building: one parking level, a ground floor and
    /// four identical office floors.
    pub fn standard() -> Self {
        let mut floors = Vec::with_capacity(OFFICE_LEVELS as usize + 2);

        floors.push(FloorConfig {
            level: -1,
            rooms: vec![RoomConfig::new(
                "p1-parking",
                RoomCategory::Parking,
                0.0,
                0.0,
                BUILDING_WIDTH,
                BUILDING_DEPTH,
                "Parking",
            )],
            is_parking: true,
        });

        floors.push(FloorConfig {
            level: 0,
            rooms: vec![
                RoomConfig::new("0-lobby", RoomCategory::Lobby, 0.0, 6.0, 35.0, 8.0, "Main Lobby"),
                RoomConfig::new("0-core", RoomCategory::Core, 0.0, -2.0, 8.0, 6.0, "Core"),
                RoomConfig::new("0-cafe", RoomCategory::Pantry, 12.0, -6.0, 12.0, 8.0, "Café"),
                RoomConfig::new("0-conf", RoomCategory::Meeting, -12.0, -6.0, 12.0, 8.0, "Conference"),
            ],
            is_parking: false,
        });

        for level in 1..=OFFICE_LEVELS {
            floors.push(FloorConfig {
                level,
                rooms: vec![
                    RoomConfig::new(format!("{level}-core"), RoomCategory::Core, 0.0, 0.0, 6.0, 6.0, "Elevators"),
                    RoomConfig::new(format!("{level}-office-w"), RoomCategory::Office, -12.0, 0.0, 16.0, 16.0, "West Office"),
                    RoomConfig::new(format!("{level}-office-e"), RoomCategory::Office, 12.0, 0.0, 16.0, 16.0, "East Office"),
                    RoomConfig::new(format!("{level}-meet"), RoomCategory::Meeting, 0.0, 7.0, 8.0, 4.0, "Meeting Room"),
                    RoomConfig::new(format!("{level}-pantry"), RoomCategory::Pantry, 0.0, -7.0, 8.0, 4.0, "Break Room"),
                ],
                is_parking: false,
            });
        }

        Self { floors }
    }

    /// Parse a layout from TOML (`[[floors]]` tables with nested `[[floors.rooms]]`)
    pub fn from_toml_str(raw: &str) -> Result<Self, SimulationError> {
        let layout: Self = toml::from_str(raw)?;
        layout.check()?;
        Ok(layout)
    }

    /// Read a layout file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimulationError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Reject duplicate room ids and negative or non-finite room dimensions
    pub fn check(&self) -> Result<(), SimulationError> {
        let mut seen = HashSet::new();
        for room in self.rooms() {
            if !seen.insert(room.id.as_str()) {
                return Err(SimulationError::DuplicateRoom(room.id.clone()));
            }
            if !room.has_valid_geometry() {
                return Err(SimulationError::InvalidRoomGeometry {
                    id: room.id.clone(),
                    width: room.width,
                    depth: room.depth,
                });
            }
        }
        Ok(())
    }

    /// All rooms, in floor order
    pub fn rooms(&self) -> impl Iterator<Item = &RoomConfig> {
        self.floors.iter().flat_map(|floor| floor.rooms.iter())
    }

    pub fn room(&self, id: &str) -> Option<&RoomConfig> {
        self.rooms().find(|room| room.id == id)
    }

    pub fn room_count(&self) -> usize {
        self.rooms().count()
    }

    /// Sum of room capacities, parking included, saturating at `u32::MAX`
    pub fn total_capacity(&self) -> u32 {
        self.rooms()
            .map(RoomConfig::max_capacity)
            .fold(0, u32::saturating_add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_layout_shape() {
        let layout = BuildingLayout::standard();

        assert_eq!(layout.floors.len(), 6);
        assert_eq!(layout.room_count(), 1 + 4 + 4 * 5);
        assert!(layout.check().is_ok());

        let parking = &layout.floors[0];
        assert!(parking.is_parking);
        assert_eq!(parking.level, -1);
        assert_eq!(parking.rooms[0].category, RoomCategory::Parking);
    }

    #[test]
    fn test_standard_layout_capacities() {
        let layout = BuildingLayout::standard();

        assert_eq!(layout.room("0-lobby").unwrap().max_capacity(), 70);
        assert_eq!(layout.room("0-cafe").unwrap().max_capacity(), 24);
        assert_eq!(layout.room("3-office-e").unwrap().max_capacity(), 64);
        assert_eq!(layout.room("4-pantry").unwrap().max_capacity(), 8);
        assert!(layout.room("5-office-e").is_none());
    }

    #[test]
    fn test_duplicate_room_rejected() {
        let room = RoomConfig::new("dup", RoomCategory::Office, 0.0, 0.0, 4.0, 4.0, "");
        let err = BuildingLayout::new(vec![FloorConfig {
            level: 0,
            rooms: vec![room.clone(), room],
            is_parking: false,
        }])
        .unwrap_err();

        assert!(matches!(err, SimulationError::DuplicateRoom(id) if id == "dup"));
    }

    #[test]
    fn test_negative_geometry_rejected() {
        let err = BuildingLayout::new(vec![FloorConfig {
            level: 0,
            rooms: vec![RoomConfig::new("neg", RoomCategory::Lobby, 0.0, 0.0, 10.0, -2.0, "")],
            is_parking: false,
        }])
        .unwrap_err();

        assert!(matches!(err, SimulationError::InvalidRoomGeometry { .. }));
    }

    #[test]
    fn test_total_capacity_saturates() {
        let layout = BuildingLayout::new(vec![FloorConfig {
            level: 0,
            rooms: vec![
                RoomConfig::new("hall-a", RoomCategory::Lobby, 0.0, 0.0, 1e6, 1e6, ""),
                RoomConfig::new("hall-b", RoomCategory::Lobby, 0.0, 0.0, 1e6, 1e6, ""),
            ],
            is_parking: false,
        }])
        .unwrap();

        assert_eq!(layout.room("hall-a").unwrap().max_capacity(), u32::MAX);
        assert_eq!(layout.total_capacity(), u32::MAX);
    }

    #[test]
    fn test_layout_from_toml() {
        let raw = r#"
            [[floors]]
            level = 0

            [[floors.rooms]]
            id = "lobby"
            category = "lobby"
            width = 10.0
            depth = 8.0

            [[floors.rooms]]
            id = "desk-area"
            category = "office"
            width = 12.0
            depth = 12.0
            label = "Desks"
        "#;

        let layout = BuildingLayout::from_toml_str(raw).unwrap();
        assert_eq!(layout.room_count(), 2);
        assert_eq!(layout.total_capacity(), 20 + 36);
        assert_eq!(layout.room("desk-area").unwrap().label, "Desks");
        assert!(!layout.floors[0].is_parking);
    }

    #[test]
    fn test_layout_from_toml_unknown_category() {
        let raw = r#"
            [[floors]]
            level = 0

            [[floors.rooms]]
            id = "x"
            category = "garage"
            width = 1.0
            depth = 1.0
        "#;

        assert!(matches!(
            BuildingLayout::from_toml_str(raw),
            Err(SimulationError::LayoutParse(_))
        ));
    }
}
