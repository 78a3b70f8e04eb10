//! Umbra Engine Runtime
//!
//! Headless binary: loads settings, spins up a scene and runs the configured
//! number of fixed ticks.

use anyhow::{Context, Result};
use std::str::FromStr;
use umbra_core::ecs::ComponentType;
use umbra_runtime::Runtime;
use umbra_script::CallSurface;
use umbra_services::Settings;

fn main() -> Result<()> {
    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(&path).with_context(|| format!("loading {path}"))?,
        None => Settings::load_or_default("umbra.json"),
    };

    let level = tracing::Level::from_str(&settings.logging.level)
        .with_context(|| format!("invalid log level '{}'", settings.logging.level))?;
    tracing_subscriber::fmt().with_max_level(level).init();

    tracing::info!("Umbra Engine v{}", umbra_core::VERSION);

    let mut runtime = Runtime::new(&settings);
    let camera = runtime.scene().create_entity("Camera");
    runtime
        .scene()
        .add_component(camera, ComponentType::Camera)
        .context("attaching the default camera")?;

    let mut drawn = 0usize;
    for _ in 0..settings.simulation.frames {
        drawn += runtime.tick().len();
    }
    runtime.stop();

    tracing::info!(
        ticks = runtime.time().tick_count(),
        elapsed = ?runtime.time().total_time(),
        entities = runtime.scene().entity_count(),
        drawn,
        "simulation finished"
    );
    Ok(())
}
