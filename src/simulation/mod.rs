//! # Building Simulation Module
//!
//! Time-driven models of a smart building, evaluated against a simulated
//! clock in `[0, 24)` hours.
//!
//! ## Components
//!
//! - **Environment**: temperature, humidity, wind and solar radiation from the sun's daily arc
//! - **Occupancy**: per-room headcount from the work schedule, room category and capacity
//! - **Energy**: cooling, heating, lighting, equipment and hot-water draw
//! - **Twin**: driver that evaluates all three for every room on each clock tick
//!
//! ## Usage
//!
//! ```rust
//! use building_twin::domain::BuildingLayout;
//! use building_twin::simulation::{BuildingTwin, TwinConfig};
//!
//! let config = TwinConfig::default()
//!     .with_start_hour(9.0)
//!     .with_random_seed(42);
//!
//! let mut twin = BuildingTwin::new(config, BuildingLayout::standard()).unwrap();
//!
//! // Advance the simulated clock by one step (0.1 h by default)
//! twin.tick().unwrap();
//!
//! let state = twin.state();
//! println!("{} - {} people, {:.0} kW", state.clock_label, state.total_occupancy, state.energy.total_kw());
//! ```

pub mod clock;
pub mod comfort;
pub mod energy;
pub mod environment;
pub mod error;
pub mod occupancy;
pub mod schedule;
pub mod summary;
pub mod twin;

pub use clock::SimulatedClock;
pub use comfort::ComfortIndex;
pub use energy::{compute_energy, EnergyBreakdown, EnergyModel, EnergyModelConfig};
pub use environment::{
    compute_environment, EnvironmentModel, EnvironmentModelConfig, EnvironmentState,
};
pub use error::SimulationError;
pub use occupancy::{compute_occupancy, OccupancyModel, OccupancyRule};
pub use schedule::WorkSchedule;
pub use summary::DaySummary;
pub use twin::{BuildingTwin, SimulationState, TwinConfig};
