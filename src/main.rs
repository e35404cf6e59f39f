use anyhow::Result;
use building_twin::{config, simulation, telemetry};
use config::{Config, PlaybackMode};
use simulation::{BuildingTwin, DaySummary};
use std::io::{BufWriter, Write};
use std::time::Duration;
use telemetry::init_tracing;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cfg = Config::load()?;
    let layout = cfg.building.layout()?;

    if cfg.simulation.random_seed.is_none() {
        warn!("no random_seed configured - noise and meeting occupancy will not be replayable");
    }

    info!(
        rooms = layout.room_count(),
        capacity = layout.total_capacity(),
        start = cfg.simulation.start_hour,
        step_hours = cfg.simulation.step_hours,
        mode = ?cfg.playback.mode,
        "starting building twin"
    );

    let mut twin = BuildingTwin::new(cfg.simulation.clone(), layout)?;

    match cfg.playback.mode {
        PlaybackMode::Sweep => run_sweep(&mut twin)?,
        PlaybackMode::Realtime => run_realtime(&mut twin, &cfg).await?,
    }

    info!("shutdown complete");
    Ok(())
}

/// One simulated day, one JSON line per state on stdout
fn run_sweep(twin: &mut BuildingTwin) -> Result<()> {
    let states = twin.simulate_day()?;

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for state in &states {
        serde_json::to_writer(&mut out, state)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;

    if let Some(summary) = DaySummary::from_states(&states, twin.step_hours()) {
        info!(
            samples = summary.samples,
            peak_occupancy = summary.peak_occupancy,
            peak_occupancy_at = %summary.peak_occupancy_at,
            peak_demand_kw = summary.peak_demand_kw,
            peak_demand_at = %summary.peak_demand_at,
            energy_kwh = summary.energy_kwh,
            mean_temperature_c = summary.mean_temperature_c,
            "day summary"
        );
    }

    Ok(())
}

/// Tick on a wall-clock interval until a shutdown signal or `max_ticks`
async fn run_realtime(twin: &mut BuildingTwin, cfg: &Config) -> Result<()> {
    let mut interval = tokio::time::interval(Duration::from_millis(cfg.playback.tick_millis));
    let shutdown = telemetry::shutdown_signal();
    tokio::pin!(shutdown);

    let mut ticks: u64 = 0;
    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = interval.tick() => {
                let state = twin.tick()?;
                info!(
                    time = %state.clock_label,
                    temperature = state.environment.temperature,
                    humidity = state.environment.humidity,
                    occupancy = state.total_occupancy,
                    total_kw = state.energy.total_kw(),
                    "tick"
                );

                ticks += 1;
                if cfg.playback.max_ticks.is_some_and(|max| ticks >= max) {
                    info!(ticks, "tick limit reached");
                    break;
                }
            }
        }
    }

    Ok(())
}
