use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::SimulationError;

/// Length of a simulated day in hours
pub const HOURS_PER_DAY: f64 = 24.0;
/// Clock resolution: hours are kept on a whole-millisecond grid
const MILLIS_PER_HOUR: f64 = 3_600_000.0;
const MILLIS_PER_DAY: u64 = 86_400_000;

/// Synthetic time of day, in hours since midnight within `[0, 24)`.
///
/// Decoupled from wall-clock time; advancing past midnight wraps.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SimulatedClock(f64);

impl SimulatedClock {
    pub const MIDNIGHT: SimulatedClock = SimulatedClock(0.0);

    /// Wrap `hours` into `[0, 24)`; non-finite input is rejected
    pub fn new(hours: f64) -> Result<Self, SimulationError> {
        if !hours.is_finite() {
            return Err(SimulationError::NonFiniteTime(hours));
        }
        Ok(Self(wrap(hours)))
    }

    /// The `ticks`-th instant of a sweep starting at `start` with `step` hours
    /// between instants.
    ///
    /// Computed from the tick index rather than by repeated addition, so long
    /// sweeps stay on the step grid.
    pub fn on_grid(start: f64, step: f64, ticks: u64) -> Result<Self, SimulationError> {
        if !step.is_finite() {
            return Err(SimulationError::NonFiniteTime(step));
        }
        Self::new(start + ticks as f64 * step)
    }

    pub fn hours(&self) -> f64 {
        self.0
    }

    /// Move forward by `step` hours, wrapping past midnight
    pub fn advance(&mut self, step: f64) -> Result<(), SimulationError> {
        if !step.is_finite() {
            return Err(SimulationError::NonFiniteTime(step));
        }
        self.0 = wrap(self.0 + step);
        Ok(())
    }

    /// `HH:MM`, minutes floored
    pub fn label(&self) -> String {
        let millis = self.millis();
        format!("{:02}:{:02}", millis / 3_600_000, millis % 3_600_000 / 60_000)
    }

    /// The same instant as a wall-clock time, truncated to whole seconds
    pub fn to_naive_time(&self) -> NaiveTime {
        let seconds = (self.millis() / 1_000) as u32;
        NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0).unwrap_or_default()
    }

    fn millis(&self) -> u64 {
        ((self.0 * MILLIS_PER_HOUR).round() as u64).min(MILLIS_PER_DAY - 1)
    }
}

/// Wrap into `[0, 24)` and snap to the millisecond grid
fn wrap(hours: f64) -> f64 {
    let snapped = (hours.rem_euclid(HOURS_PER_DAY) * MILLIS_PER_HOUR).round() / MILLIS_PER_HOUR;
    // rem_euclid and the snap can both land on exactly 24.0
    if snapped >= HOURS_PER_DAY {
        0.0
    } else {
        snapped
    }
}

impl Default for SimulatedClock {
    fn default() -> Self {
        Self::MIDNIGHT
    }
}

impl TryFrom<f64> for SimulatedClock {
    type Error = SimulationError;

    fn try_from(hours: f64) -> Result<Self, Self::Error> {
        Self::new(hours)
    }
}

impl From<SimulatedClock> for f64 {
    fn from(clock: SimulatedClock) -> Self {
        clock.0
    }
}

impl fmt::Display for SimulatedClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
