//! Umbra Engine Runtime
//!
//! Reference engine for the scripting bridge: [`SceneHost`] answers every
//! call on the script call surface, and [`Runtime`] ties it to a script host
//! and a fixed-tick clock.

mod scene;

pub use scene::SceneHost;

use std::sync::Arc;
use umbra_asset::AssetLoader;
use umbra_core::time::SimulationTime;
use umbra_render::DrawCommand;
use umbra_script::{Engine, ScriptHost};
use umbra_services::Settings;

pub struct Runtime {
    scene: Arc<SceneHost>,
    scripts: ScriptHost,
    time: SimulationTime,
}

impl Runtime {
    pub fn new(settings: &Settings) -> Self {
        let scene = Arc::new(SceneHost::new(AssetLoader::new(&settings.assets.root)));
        let engine: Engine = scene.clone();
        Self {
            scene,
            scripts: ScriptHost::new(engine),
            time: SimulationTime::with_rate(settings.simulation.tick_rate_hz),
        }
    }

    pub fn scene(&self) -> &Arc<SceneHost> {
        &self.scene
    }

    pub fn scripts(&self) -> &ScriptHost {
        &self.scripts
    }

    pub fn time(&self) -> &SimulationTime {
        &self.time
    }

    /// Advance one fixed tick: scripts first, then physics. Returns the
    /// debug draw commands issued during the tick.
    pub fn tick(&mut self) -> Vec<DrawCommand> {
        let dt = self.time.advance_tick();
        self.scripts.update(dt);
        self.scene.step_physics(dt);
        self.scene.take_draw_commands()
    }

    /// Detach every script, running their `on_destroyed`.
    pub fn stop(&self) {
        self.scripts.shutdown();
    }
}
