//! # Environment Model
//!
//! Ambient conditions driven purely by time of day. The sun rises at 06:00,
//! peaks at 12:00 and sets at 18:00; temperature, humidity and solar radiation
//! follow its intensity.
//!
//! The model is split into a deterministic baseline and a stochastic jitter
//! layer (temperature noise and wind gusts). The jitter draws from a caller
//! supplied generator, so seeding that generator makes a run replayable.

use rand::Rng;
use rand_distr::{Distribution, Uniform};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use validator::Validate;

use super::error::first_non_finite;
use super::SimulationError;

const HORIZON_EPSILON: f64 = 1e-12;

/// Ambient conditions at one instant
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EnvironmentState {
    /// Air temperature in °C
    pub temperature: f64,
    /// Relative humidity in % (0-100)
    pub humidity: f64,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Global solar radiation in W/m²
    pub solar_radiation: f64,
}

/// Environment model coefficients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct EnvironmentModelConfig {
    /// Night-time temperature in °C
    pub base_temperature_c: f64,
    /// Temperature rise at full sun in °C
    #[validate(range(min = 0.0))]
    pub solar_temperature_gain_c: f64,
    /// Amplitude of the symmetric temperature noise in °C
    #[validate(range(min = 0.0))]
    pub temperature_noise_c: f64,
    /// Humidity at full sun in %
    #[validate(range(min = 0.0, max = 100.0))]
    pub base_humidity_pct: f64,
    /// Additional humidity at night in %
    #[validate(range(min = 0.0, max = 100.0))]
    pub humidity_swing_pct: f64,
    /// Calm wind speed in m/s
    #[validate(range(min = 0.0))]
    pub base_wind_speed_ms: f64,
    /// Width of the uniform gust added to the base wind speed, in m/s
    #[validate(range(min = 0.0))]
    pub wind_gust_range_ms: f64,
    /// Solar radiation at solar noon in W/m²
    #[validate(range(min = 0.0))]
    pub peak_solar_radiation_w_m2: f64,
}

impl Default for EnvironmentModelConfig {
    fn default() -> Self {
        Self {
            base_temperature_c: 15.0,
            solar_temperature_gain_c: 10.0,
            temperature_noise_c: 1.0,
            base_humidity_pct: 40.0,
            humidity_swing_pct: 20.0,
            base_wind_speed_ms: 5.0,
            wind_gust_range_ms: 10.0,
            peak_solar_radiation_w_m2: 800.0,
        }
    }
}

impl EnvironmentModelConfig {
    /// Every coefficient finite, plus range checks
    pub fn check(&self) -> Result<(), SimulationError> {
        if let Some((field, value)) = first_non_finite(&[
            ("base_temperature_c", self.base_temperature_c),
            ("solar_temperature_gain_c", self.solar_temperature_gain_c),
            ("temperature_noise_c", self.temperature_noise_c),
            ("base_humidity_pct", self.base_humidity_pct),
            ("humidity_swing_pct", self.humidity_swing_pct),
            ("base_wind_speed_ms", self.base_wind_speed_ms),
            ("wind_gust_range_ms", self.wind_gust_range_ms),
            ("peak_solar_radiation_w_m2", self.peak_solar_radiation_w_m2),
        ]) {
            return Err(SimulationError::InvalidConfig(format!(
                "environment.{field} must be finite, got {value}"
            )));
        }
        self.validate()?;
        Ok(())
    }
}

/// Time-of-day environment model
#[derive(Debug, Clone, Default)]
pub struct EnvironmentModel {
    config: EnvironmentModelConfig,
}

impl EnvironmentModel {
    pub fn new(config: EnvironmentModelConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EnvironmentModelConfig {
        &self.config
    }

    /// Sun intensity in [0, 1]: `max(0, sin((t - 6) / 12 · π))`.
    ///
    /// Periodic in `t`, so out-of-range or wrapped hours are valid input.
    /// A non-finite `t` yields 0, as does the rounding residue of `sin` at the horizon.
    pub fn sun_intensity(t: f64) -> f64 {
        let sun_phase = (t - 6.0) / 12.0;
        let intensity = (sun_phase * PI).sin();
        if intensity.is_nan() || intensity < HORIZON_EPSILON {
            0.0
        } else {
            intensity
        }
    }

    /// Noise-free conditions at `t`: no temperature noise, wind at its calm base
    pub fn baseline(&self, t: f64) -> EnvironmentState {
        let sun = Self::sun_intensity(t);
        let cfg = &self.config;

        EnvironmentState {
            temperature: cfg.base_temperature_c + sun * cfg.solar_temperature_gain_c,
            humidity: cfg.base_humidity_pct + (1.0 - sun) * cfg.humidity_swing_pct,
            wind_speed: cfg.base_wind_speed_ms,
            solar_radiation: (sun * cfg.peak_solar_radiation_w_m2).max(0.0),
        }
    }

    /// Conditions at `t` with temperature noise and wind gusts drawn from `rng`
    pub fn compute<R: Rng + ?Sized>(&self, t: f64, rng: &mut R) -> EnvironmentState {
        let mut state = self.baseline(t);
        state.temperature += self.temperature_noise(rng);
        state.wind_speed += self.wind_gust(rng);
        state
    }

    /// Uniform draw in `[-a, a]` where `a` is the configured noise amplitude
    fn temperature_noise<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let amplitude = self.config.temperature_noise_c;
        if amplitude <= 0.0 {
            return 0.0;
        }
        Uniform::new_inclusive(-amplitude, amplitude).sample(rng)
    }

    /// Uniform draw in `[0, range)`
    fn wind_gust<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let range = self.config.wind_gust_range_ms;
        if range <= 0.0 {
            return 0.0;
        }
        Uniform::new(0.0, range).sample(rng)
    }
}

/// [`EnvironmentModel::compute`] with the default coefficients
pub fn compute_environment<R: Rng + ?Sized>(t: f64, rng: &mut R) -> EnvironmentState {
    EnvironmentModel::default().compute(t, rng)
}
