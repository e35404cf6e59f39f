//! # Occupancy Model
//!
//! Per-room headcount from time of day, room category and room capacity.
//!
//! The working day ramps up linearly over its first hour and down over its
//! last, with a full plateau in between. During lunch people move from the
//! offices into pantries and lobbies. Meeting rooms are intermittently
//! occupied: each evaluation flips a fair coin drawn from the caller's
//! generator.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::schedule::WorkSchedule;
use crate::domain::RoomCategory;

/// Share of capacity used by pantries and lobbies during lunch
const LUNCH_SOCIAL_SHARE: f64 = 0.8;
/// Share of capacity left in offices during lunch
const LUNCH_OFFICE_SHARE: f64 = 0.3;
/// Share of capacity used by pantries and lobbies outside lunch
const SOCIAL_SHARE: f64 = 0.1;
/// Share of capacity used by offices outside lunch
const OFFICE_SHARE: f64 = 0.9;
/// Share of capacity used by a meeting room while a meeting is on
const MEETING_SHARE: f64 = 0.5;
/// Share used by core spaces and by any room without a dedicated rule
const BACKGROUND_SHARE: f64 = 0.1;
/// Probability that a meeting room is in use at a given evaluation
const MEETING_PROBABILITY: f64 = 0.5;

/// How a room's capacity is scaled at a given time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OccupancyRule {
    /// Always empty
    Vacant,
    /// `capacity · share · ramp`
    Share(f64),
    /// `capacity · share · ramp · coin`, coin ∈ {0, 1}
    Intermittent(f64),
    /// `capacity · ramp · 0.1`
    Background,
}

/// Time-of-day occupancy model
#[derive(Debug, Clone, Default)]
pub struct OccupancyModel {
    schedule: WorkSchedule,
}

impl OccupancyModel {
    pub fn new(schedule: WorkSchedule) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> &WorkSchedule {
        &self.schedule
    }

    /// Fraction of the working population present at `t`, in [0, 1].
    ///
    /// Zero outside `[work_start, work_end)` and for non-finite `t`.
    pub fn ramp_factor(&self, t: f64) -> f64 {
        let s = &self.schedule;

        let factor = if !t.is_finite() || !s.is_open(t) {
            0.0
        } else if t < s.work_start + 1.0 {
            t - s.work_start
        } else if t > s.work_end - 1.0 {
            s.work_end - t
        } else {
            1.0
        };

        factor.clamp(0.0, 1.0)
    }

    /// The deterministic rule applying to `category` at `t`
    pub fn rule(&self, t: f64, category: RoomCategory) -> OccupancyRule {
        let lunch = self.schedule.is_lunch(t);

        match category {
            RoomCategory::Parking => OccupancyRule::Vacant,
            RoomCategory::Pantry | RoomCategory::Lobby if lunch => {
                OccupancyRule::Share(LUNCH_SOCIAL_SHARE)
            }
            RoomCategory::Office if lunch => OccupancyRule::Share(LUNCH_OFFICE_SHARE),
            RoomCategory::Meeting if lunch => OccupancyRule::Background,
            RoomCategory::Pantry | RoomCategory::Lobby => OccupancyRule::Share(SOCIAL_SHARE),
            RoomCategory::Office => OccupancyRule::Share(OFFICE_SHARE),
            RoomCategory::Meeting => OccupancyRule::Intermittent(MEETING_SHARE),
            RoomCategory::Core => OccupancyRule::Background,
        }
    }

    /// Occupants of a room at `t`, always within `[0, max_capacity]`.
    ///
    /// Only intermittent rooms draw from `rng`.
    pub fn compute<R: Rng + ?Sized>(
        &self,
        t: f64,
        category: RoomCategory,
        max_capacity: u32,
        rng: &mut R,
    ) -> u32 {
        let ramp = self.ramp_factor(t);
        let capacity = max_capacity as f64;

        let raw = match self.rule(t, category) {
            OccupancyRule::Vacant => 0.0,
            OccupancyRule::Share(share) => capacity * share * ramp,
            OccupancyRule::Intermittent(share) => {
                let in_use = rng.gen_bool(MEETING_PROBABILITY);
                capacity * share * ramp * if in_use { 1.0 } else { 0.0 }
            }
            OccupancyRule::Background => capacity * ramp * BACKGROUND_SHARE,
        };

        floor_to_capacity(raw, max_capacity)
    }
}

fn floor_to_capacity(raw: f64, max_capacity: u32) -> u32 {
    let floored = raw.floor();
    if floored.is_nan() || floored <= 0.0 {
        0
    } else if floored >= max_capacity as f64 {
        max_capacity
    } else {
        floored as u32
    }
}

/// [`OccupancyModel::compute`] with the default work schedule
pub fn compute_occupancy<R: Rng + ?Sized>(
    t: f64,
    category: RoomCategory,
    max_capacity: u32,
    rng: &mut R,
) -> u32 {
    OccupancyModel::default().compute(t, category, max_capacity, rng)
}
