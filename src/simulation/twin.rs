//! # Building Twin
//!
//! The driver that composes the environment, occupancy and energy models over
//! a simulated clock. Each evaluation computes ambient conditions, then the
//! occupancy of every room in the layout, then the energy breakdown from the
//! aggregate occupancy and the modelled temperature.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;
use validator::Validate;

use super::{
    clock::HOURS_PER_DAY, ComfortIndex, EnergyBreakdown, EnergyModel, EnergyModelConfig,
    EnvironmentModel, EnvironmentModelConfig, EnvironmentState, OccupancyModel, SimulatedClock,
    SimulationError, WorkSchedule,
};
use crate::domain::BuildingLayout;

/// Shortest accepted tick: one simulated second
pub const MIN_STEP_HOURS: f64 = 1.0 / 3600.0;

/// Complete twin state at one simulated instant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Hours since midnight, within [0, 24)
    pub time_hours: f64,
    /// `HH:MM` label of `time_hours`
    pub clock_label: String,
    pub environment: EnvironmentState,
    /// Occupants per room id
    pub occupancy: BTreeMap<String, u32>,
    pub total_occupancy: u32,
    pub energy: EnergyBreakdown,
    /// Comfort band of the modelled temperature
    pub comfort: Option<ComfortIndex>,
}

/// Twin configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct TwinConfig {
    /// Simulated hour the twin starts at
    #[validate(range(min = 0.0, max = 24.0))]
    pub start_hour: f64,
    /// Hours the clock advances per tick, between [`MIN_STEP_HOURS`] and 24
    pub step_hours: f64,
    /// Random seed for reproducibility (None = random)
    pub random_seed: Option<u64>,
    pub schedule: WorkSchedule,
    pub environment: EnvironmentModelConfig,
    pub energy: EnergyModelConfig,
}

impl Default for TwinConfig {
    fn default() -> Self {
        Self {
            start_hour: 10.0,
            step_hours: 0.1,
            random_seed: None,
            schedule: WorkSchedule::default(),
            environment: EnvironmentModelConfig::default(),
            energy: EnergyModelConfig::default(),
        }
    }
}

impl TwinConfig {
    /// Set the starting hour
    pub fn with_start_hour(mut self, hour: f64) -> Self {
        self.start_hour = hour;
        self
    }

    /// Set the tick length in hours
    pub fn with_step_hours(mut self, step: f64) -> Self {
        self.step_hours = step;
        self
    }

    /// Set random seed for all stochastic terms
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Replace the work schedule
    pub fn with_schedule(mut self, schedule: WorkSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Validate every section
    pub fn check(&self) -> Result<(), SimulationError> {
        if !self.start_hour.is_finite() {
            return Err(SimulationError::NonFiniteTime(self.start_hour));
        }
        self.validate()?;

        if !self.step_hours.is_finite()
            || self.step_hours < MIN_STEP_HOURS
            || self.step_hours > HOURS_PER_DAY
        {
            return Err(SimulationError::InvalidStep(self.step_hours));
        }

        self.schedule.check()?;
        self.environment.check()?;
        self.energy.check()?;
        Ok(())
    }

    /// Number of ticks in one simulated day
    pub fn samples_per_day(&self) -> usize {
        ((HOURS_PER_DAY / self.step_hours).round() as usize).max(1)
    }
}

/// Digital twin of one building
///
/// Owns the models, the layout, the clock and the random generator. With a
/// fixed `random_seed` every run is replayable.
pub struct BuildingTwin {
    environment: EnvironmentModel,
    occupancy: OccupancyModel,
    energy: EnergyModel,
    layout: BuildingLayout,
    clock: SimulatedClock,
    /// Where the current run of ticks started
    origin: f64,
    /// Ticks since `origin`
    ticks: u64,
    samples_per_day: usize,
    step_hours: f64,
    rng: StdRng,
    current: SimulationState,
}

impl BuildingTwin {
    /// Create a twin, validating the configuration and the layout
    pub fn new(config: TwinConfig, layout: BuildingLayout) -> Result<Self, SimulationError> {
        config.check()?;
        layout.check()?;

        let rng = match config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let clock = SimulatedClock::new(config.start_hour)?;
        let mut twin = Self {
            environment: EnvironmentModel::new(config.environment.clone()),
            occupancy: OccupancyModel::new(config.schedule),
            energy: EnergyModel::new(config.energy.clone()),
            layout,
            clock,
            origin: clock.hours(),
            ticks: 0,
            samples_per_day: config.samples_per_day(),
            step_hours: config.step_hours,
            rng,
            current: SimulationState::default(),
        };

        twin.refresh();
        Ok(twin)
    }

    pub fn clock(&self) -> SimulatedClock {
        self.clock
    }

    pub fn layout(&self) -> &BuildingLayout {
        &self.layout
    }

    pub fn step_hours(&self) -> f64 {
        self.step_hours
    }

    /// Latest evaluated state
    pub fn state(&self) -> &SimulationState {
        &self.current
    }

    /// Occupants of one room in the latest state
    pub fn room_occupancy(&self, room_id: &str) -> Option<u32> {
        self.current.occupancy.get(room_id).copied()
    }

    /// Advance the clock by one step and re-evaluate
    pub fn tick(&mut self) -> Result<&SimulationState, SimulationError> {
        let ticks = self.ticks + 1;
        self.clock = SimulatedClock::on_grid(self.origin, self.step_hours, ticks)?;
        self.ticks = ticks;
        self.refresh();
        Ok(&self.current)
    }

    /// Jump to a time of day and re-evaluate
    pub fn advance_to(&mut self, hours: f64) -> Result<&SimulationState, SimulationError> {
        self.clock = SimulatedClock::new(hours)?;
        self.origin = self.clock.hours();
        self.ticks = 0;
        self.refresh();
        Ok(&self.current)
    }

    /// Sample one full day starting at the current time
    ///
    /// Returns one state per step; the clock ends where it started.
    pub fn simulate_day(&mut self) -> Result<Vec<SimulationState>, SimulationError> {
        let mut states = Vec::with_capacity(self.samples_per_day);

        for _ in 0..self.samples_per_day {
            states.push(self.current.clone());
            self.tick()?;
        }

        Ok(states)
    }

    fn refresh(&mut self) {
        let t = self.clock.hours();
        let environment = self.environment.compute(t, &mut self.rng);

        let mut occupancy = BTreeMap::new();
        let mut total_occupancy: u32 = 0;
        for room in self.layout.rooms() {
            let count = self
                .occupancy
                .compute(t, room.category, room.max_capacity(), &mut self.rng);
            total_occupancy = total_occupancy.saturating_add(count);
            occupancy.insert(room.id.clone(), count);
        }

        let energy = self.energy.compute(t, total_occupancy, environment.temperature);

        debug!(
            time = %self.clock,
            temperature = environment.temperature,
            total_occupancy,
            total_kw = energy.total_kw(),
            "twin state updated"
        );

        self.current = SimulationState {
            time_hours: t,
            clock_label: self.clock.label(),
            environment,
            occupancy,
            total_occupancy,
            energy,
            comfort: ComfortIndex::classify(environment.temperature),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FloorConfig, RoomCategory, RoomConfig};

    fn seeded() -> TwinConfig {
        TwinConfig::default().with_random_seed(42)
    }

    #[test]
    fn test_twin_initialization() {
        let twin = BuildingTwin::new(seeded(), BuildingLayout::standard()).unwrap();
        let state = twin.state();

        assert_eq!(state.time_hours, 10.0);
        assert_eq!(state.clock_label, "10:00");
        assert_eq!(state.occupancy.len(), twin.layout().room_count());
        assert!(state.total_occupancy > 0);
        assert_eq!(twin.room_occupancy("p1-parking"), Some(0));
        assert!(state.comfort.is_some());
    }

    #[test]
    fn test_total_matches_rooms() {
        let twin = BuildingTwin::new(seeded(), BuildingLayout::standard()).unwrap();
        let state = twin.state();

        let sum: u32 = state.occupancy.values().sum();
        assert_eq!(sum, state.total_occupancy);
    }

    #[test]
    fn test_energy_uses_aggregate_occupancy() {
        let twin = BuildingTwin::new(seeded(), BuildingLayout::standard()).unwrap();
        let state = twin.state();

        let expected = EnergyModel::default().compute(
            state.time_hours,
            state.total_occupancy,
            state.environment.temperature,
        );
        assert_eq!(state.energy, expected);
    }

    #[test]
    fn test_tick_advances_clock() {
        let mut twin = BuildingTwin::new(seeded().with_step_hours(0.5), BuildingLayout::standard()).unwrap();

        twin.tick().unwrap();
        assert!((twin.clock().hours() - 10.5).abs() < 1e-9);
        assert_eq!(twin.state().clock_label, "10:30");
    }

    #[test]
    fn test_tick_wraps_at_midnight() {
        let config = seeded().with_start_hour(23.0).with_step_hours(2.0);
        let mut twin = BuildingTwin::new(config, BuildingLayout::standard()).unwrap();

        let state = twin.tick().unwrap();
        assert!((state.time_hours - 1.0).abs() < 1e-9);
        assert_eq!(state.total_occupancy, 0);
    }

    #[test]
    fn test_night_building_is_empty() {
        let mut twin = BuildingTwin::new(seeded(), BuildingLayout::standard()).unwrap();

        let state = twin.advance_to(2.0).unwrap();
        assert_eq!(state.total_occupancy, 0);
        assert_eq!(state.environment.solar_radiation, 0.0);
        assert_eq!(state.energy.equipment, 100.0);
        assert_eq!(state.energy.hot_water, 0.0);
    }

    #[test]
    fn test_advance_to_rejects_nan() {
        let mut twin = BuildingTwin::new(seeded(), BuildingLayout::standard()).unwrap();
        assert!(matches!(
            twin.advance_to(f64::NAN),
            Err(SimulationError::NonFiniteTime(_))
        ));
        assert_eq!(twin.clock().hours(), 10.0);
    }

    #[test]
    fn test_simulate_day() {
        let config = seeded().with_start_hour(0.0).with_step_hours(1.0);
        let mut twin = BuildingTwin::new(config, BuildingLayout::standard()).unwrap();

        let states = twin.simulate_day().unwrap();
        assert_eq!(states.len(), 24);

        // Peak solar radiation is at noon
        let sunniest = states
            .iter()
            .max_by(|a, b| {
                a.environment
                    .solar_radiation
                    .partial_cmp(&b.environment.solar_radiation)
                    .unwrap()
            })
            .unwrap();
        assert_eq!(sunniest.time_hours, 12.0);

        // Closed before 8 and from 18 on
        for state in &states {
            if state.time_hours < 8.0 || state.time_hours >= 18.0 {
                assert_eq!(state.total_occupancy, 0, "at {}", state.clock_label);
            }
        }

        assert!(twin.clock().hours().abs() < 1e-9);
    }

    #[test]
    fn test_shortest_step_is_bounded() {
        let config = seeded().with_step_hours(MIN_STEP_HOURS);
        assert!(config.check().is_ok());
        assert_eq!(config.samples_per_day(), 86_400);
    }

    #[test]
    fn test_sweep_stays_on_step_grid() {
        let config = seeded().with_start_hour(0.0).with_step_hours(0.1);
        let mut twin = BuildingTwin::new(config, BuildingLayout::standard()).unwrap();

        let states = twin.simulate_day().unwrap();
        assert_eq!(states.len(), 240);

        for (tick, state) in states.iter().enumerate() {
            let minutes = tick * 6;
            assert_eq!(
                state.clock_label,
                format!("{:02}:{:02}", minutes / 60, minutes % 60),
                "tick {tick}"
            );
        }

        // 07:00 is daytime lighting, and the building is still closed
        let seven = &states[70];
        assert_eq!(seven.time_hours, 7.0);
        assert_eq!(seven.total_occupancy, 0);
        assert_eq!(seven.energy.lighting, 500.0);

        assert_eq!(states[80].time_hours, 8.0);
        assert_eq!(states[180].time_hours, 18.0);
        assert_eq!(states[180].total_occupancy, 0);
        assert_eq!(twin.clock().hours(), 0.0);
    }

    #[test]
    fn test_advance_to_restarts_grid() {
        let mut twin = BuildingTwin::new(seeded().with_step_hours(0.1), BuildingLayout::standard()).unwrap();
        twin.advance_to(6.0).unwrap();
        for _ in 0..10 {
            twin.tick().unwrap();
        }
        assert_eq!(twin.clock().hours(), 7.0);
        assert_eq!(twin.state().clock_label, "07:00");
    }

    #[test]
    fn test_non_finite_coefficients_rejected() {
        let mut config = seeded();
        config.environment.temperature_noise_c = f64::INFINITY;
        assert!(matches!(
            BuildingTwin::new(config, BuildingLayout::standard()),
            Err(SimulationError::InvalidConfig(_))
        ));

        let mut config = seeded();
        config.energy.setpoint_c = f64::NAN;
        assert!(BuildingTwin::new(config, BuildingLayout::standard()).is_err());

        let mut config = seeded();
        config.schedule.lunch_end = f64::NAN;
        assert!(matches!(
            BuildingTwin::new(config, BuildingLayout::standard()),
            Err(SimulationError::InvalidSchedule(_))
        ));

        assert!(matches!(
            seeded().with_start_hour(f64::NAN).check(),
            Err(SimulationError::NonFiniteTime(_))
        ));
    }

    #[test]
    fn test_default_step_samples_per_day() {
        assert_eq!(TwinConfig::default().samples_per_day(), 240);
        assert_eq!(TwinConfig::default().with_step_hours(0.25).samples_per_day(), 96);
        assert_eq!(TwinConfig::default().with_step_hours(24.0).samples_per_day(), 1);
    }

    #[test]
    fn test_seeded_twins_replay() {
        let mut a = BuildingTwin::new(seeded(), BuildingLayout::standard()).unwrap();
        let mut b = BuildingTwin::new(seeded(), BuildingLayout::standard()).unwrap();

        assert_eq!(a.simulate_day().unwrap(), b.simulate_day().unwrap());
    }

    #[test]
    fn test_invalid_step_rejected() {
        for step in [0.0, -0.1, 25.0, f64::NAN, 1e-300, 1e-9, MIN_STEP_HOURS / 2.0] {
            let result = BuildingTwin::new(seeded().with_step_hours(step), BuildingLayout::standard());
            assert!(matches!(result, Err(SimulationError::InvalidStep(_))));
        }
    }

    #[test]
    fn test_invalid_layout_rejected() {
        let room = RoomConfig::new("a", RoomCategory::Office, 0.0, 0.0, 4.0, 4.0, "");
        let layout = BuildingLayout {
            floors: vec![FloorConfig {
                level: 0,
                rooms: vec![room.clone(), room],
                is_parking: false,
            }],
        };

        assert!(matches!(
            BuildingTwin::new(seeded(), layout),
            Err(SimulationError::DuplicateRoom(_))
        ));
    }

    #[test]
    fn test_custom_schedule_flows_through() {
        let schedule = WorkSchedule::new(20.0, 23.0, 21.0, 21.5).unwrap();
        let mut twin = BuildingTwin::new(seeded().with_schedule(schedule), BuildingLayout::standard()).unwrap();

        assert_eq!(twin.state().total_occupancy, 0);
        let state = twin.advance_to(22.0).unwrap();
        assert!(state.total_occupancy > 0);
    }
}
