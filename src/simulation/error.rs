use thiserror::Error;

/// Errors raised at the boundary of the simulation (clock, configuration, layout).
///
/// The models themselves are total and never fail; these errors come from
/// validating what a driver hands them.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Simulated time must be finite, got {0}")]
    NonFiniteTime(f64),

    #[error("Invalid time step: {0}h (must be within (0, 24])")]
    InvalidStep(f64),

    #[error("Invalid work schedule: {0}")]
    InvalidSchedule(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Duplicate room id in layout: {0}")]
    DuplicateRoom(String),

    #[error("Room {id} has invalid geometry: {width}m x {depth}m")]
    InvalidRoomGeometry { id: String, width: f64, depth: f64 },

    #[error("Failed to parse building layout: {0}")]
    LayoutParse(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<validator::ValidationErrors> for SimulationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        SimulationError::InvalidConfig(errors.to_string())
    }
}

/// First `(name, value)` pair holding a NaN or infinite value
pub(crate) fn first_non_finite<'a>(fields: &[(&'a str, f64)]) -> Option<(&'a str, f64)> {
    fields.iter().copied().find(|(_, value)| !value.is_finite())
}
