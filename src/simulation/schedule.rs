//! # Work Schedule
//!
//! The opening hours and lunch window of the building. Occupancy ramps and
//! lunch redistribution are both expressed against this structure, so several
//! building profiles can share the same models.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::error::first_non_finite;
use super::SimulationError;

/// Default start of the working day (hours since midnight)
pub const WORK_START: f64 = 8.0;
/// Default end of the working day
pub const WORK_END: f64 = 18.0;
/// Default start of the lunch window
pub const LUNCH_START: f64 = 12.0;
/// Default end of the lunch window
pub const LUNCH_END: f64 = 13.0;

/// Work-hours and lunch-hours windows, all in hours since midnight.
///
/// Both windows are half-open: `[work_start, work_end)` and `[lunch_start, lunch_end)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct WorkSchedule {
    #[validate(range(min = 0.0, max = 24.0))]
    pub work_start: f64,
    #[validate(range(min = 0.0, max = 24.0))]
    pub work_end: f64,
    #[validate(range(min = 0.0, max = 24.0))]
    pub lunch_start: f64,
    #[validate(range(min = 0.0, max = 24.0))]
    pub lunch_end: f64,
}

impl Default for WorkSchedule {
    fn default() -> Self {
        Self {
            work_start: WORK_START,
            work_end: WORK_END,
            lunch_start: LUNCH_START,
            lunch_end: LUNCH_END,
        }
    }
}

impl WorkSchedule {
    /// Create a schedule, rejecting windows that are out of range or inverted
    pub fn new(
        work_start: f64,
        work_end: f64,
        lunch_start: f64,
        lunch_end: f64,
    ) -> Result<Self, SimulationError> {
        let schedule = Self {
            work_start,
            work_end,
            lunch_start,
            lunch_end,
        };
        schedule.check()?;
        Ok(schedule)
    }

    /// Finite hours, range checks plus window ordering
    pub fn check(&self) -> Result<(), SimulationError> {
        if let Some((field, value)) = first_non_finite(&[
            ("work_start", self.work_start),
            ("work_end", self.work_end),
            ("lunch_start", self.lunch_start),
            ("lunch_end", self.lunch_end),
        ]) {
            return Err(SimulationError::InvalidSchedule(format!(
                "{field} must be finite, got {value}"
            )));
        }
        self.validate()?;

        if self.work_start >= self.work_end {
            return Err(SimulationError::InvalidSchedule(format!(
                "work_start ({}) must be before work_end ({})",
                self.work_start, self.work_end
            )));
        }
        if self.lunch_start > self.lunch_end {
            return Err(SimulationError::InvalidSchedule(format!(
                "lunch_start ({}) must not be after lunch_end ({})",
                self.lunch_start, self.lunch_end
            )));
        }

        Ok(())
    }

    /// Whether the building is open at `t`
    pub fn is_open(&self, t: f64) -> bool {
        t >= self.work_start && t < self.work_end
    }

    /// Whether `t` falls inside the lunch window
    pub fn is_lunch(&self, t: f64) -> bool {
        t >= self.lunch_start && t < self.lunch_end
    }

    /// Length of the working day in hours
    pub fn work_hours(&self) -> f64 {
        self.work_end - self.work_start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_constants() {
        let schedule = WorkSchedule::default();
        assert_eq!(schedule.work_start, 8.0);
        assert_eq!(schedule.work_end, 18.0);
        assert_eq!(schedule.lunch_start, 12.0);
        assert_eq!(schedule.lunch_end, 13.0);
        assert!(schedule.check().is_ok());
        assert_eq!(schedule.work_hours(), 10.0);
    }

    #[test]
    fn test_windows_are_half_open() {
        let schedule = WorkSchedule::default();

        assert!(schedule.is_open(8.0));
        assert!(schedule.is_open(17.99));
        assert!(!schedule.is_open(18.0));
        assert!(!schedule.is_open(7.99));

        assert!(schedule.is_lunch(12.0));
        assert!(!schedule.is_lunch(13.0));
        assert!(!schedule.is_open(f64::NAN));
    }

    #[test]
    fn test_inverted_work_window_rejected() {
        let err = WorkSchedule::new(18.0, 8.0, 12.0, 13.0).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidSchedule(_)));
    }

    #[test]
    fn test_inverted_lunch_window_rejected() {
        let err = WorkSchedule::new(8.0, 18.0, 13.0, 12.0).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidSchedule(_)));
    }

    #[test]
    fn test_out_of_range_hours_rejected() {
        let err = WorkSchedule::new(8.0, 25.0, 12.0, 13.0).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidConfig(_)));
    }

    #[test]
    fn test_non_finite_hours_rejected() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = WorkSchedule::new(8.0, 18.0, value, 13.0).unwrap_err();
            assert!(matches!(err, SimulationError::InvalidSchedule(_)), "lunch_start={value}");

            let schedule = WorkSchedule {
                work_end: value,
                ..Default::default()
            };
            assert!(schedule.check().is_err(), "work_end={value}");
        }
    }

    #[test]
    fn test_custom_schedule() {
        let schedule = WorkSchedule::new(6.0, 14.0, 10.0, 10.5).unwrap();
        assert!(schedule.is_open(6.5));
        assert!(!schedule.is_open(15.0));
        assert!(schedule.is_lunch(10.25));
    }
}
