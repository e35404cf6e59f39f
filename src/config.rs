use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::Validate;

use crate::domain::BuildingLayout;
use crate::simulation::{SimulationError, TwinConfig};

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub simulation: TwinConfig,
    pub playback: PlaybackConfig,
    pub building: BuildingConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackMode {
    /// Sample one simulated day as fast as possible
    #[default]
    Sweep,
    /// Tick on a wall-clock interval until stopped
    Realtime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PlaybackConfig {
    pub mode: PlaybackMode,
    #[validate(range(min = 1))]
    pub tick_millis: u64,
    pub max_ticks: Option<u64>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            mode: PlaybackMode::Sweep,
            tick_millis: 100,
            max_ticks: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildingConfig {
    /// TOML floor plan; the standard building when absent
    pub layout_path: Option<PathBuf>,
}

impl BuildingConfig {
    pub fn layout(&self) -> Result<BuildingLayout, SimulationError> {
        match &self.layout_path {
            Some(path) => BuildingLayout::load(path),
            None => Ok(BuildingLayout::standard()),
        }
    }
}

impl Config {
    /// Defaults, then the TOML file (`TWIN_CONFIG` or `config/default.toml`),
    /// then `TWIN__`-prefixed environment variables.
    pub fn load() -> Result<Self> {
        let path = std::env::var("TWIN_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("TWIN__").split("__"));
        let cfg: Config = figment.extract()?;
        cfg.check()?;
        Ok(cfg)
    }

    pub fn check(&self) -> Result<(), SimulationError> {
        self.simulation.check()?;
        self.playback.validate()?;
        Ok(())
    }
}
