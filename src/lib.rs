pub mod config;
pub mod domain;
pub mod simulation;
pub mod telemetry;
