use serde::{Deserialize, Serialize};

use super::SimulationState;

/// Aggregates over a sweep of twin states
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub samples: usize,
    pub peak_occupancy: u32,
    /// Clock label of the first sample reaching `peak_occupancy`
    pub peak_occupancy_at: String,
    pub peak_demand_kw: f64,
    /// Clock label of the first sample reaching `peak_demand_kw`
    pub peak_demand_at: String,
    /// Energy over the sweep: Σ total kW × step hours
    pub energy_kwh: f64,
    pub mean_temperature_c: f64,
}

impl DaySummary {
    /// Summarise `states` sampled every `step_hours`; `None` when empty
    pub fn from_states(states: &[SimulationState], step_hours: f64) -> Option<Self> {
        let first = states.first()?;

        let mut peak_occupancy = first;
        let mut peak_demand = first;
        let mut energy_kwh = 0.0;
        let mut temperature_sum = 0.0;

        for state in states {
            if state.total_occupancy > peak_occupancy.total_occupancy {
                peak_occupancy = state;
            }
            if state.energy.total_kw() > peak_demand.energy.total_kw() {
                peak_demand = state;
            }
            energy_kwh += state.energy.total_kw() * step_hours;
            temperature_sum += state.environment.temperature;
        }

        Some(Self {
            samples: states.len(),
            peak_occupancy: peak_occupancy.total_occupancy,
            peak_occupancy_at: peak_occupancy.clock_label.clone(),
            peak_demand_kw: peak_demand.energy.total_kw(),
            peak_demand_at: peak_demand.clock_label.clone(),
            energy_kwh,
            mean_temperature_c: temperature_sum / states.len() as f64,
        })
    }
}
