#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use umbra_asset::AssetLoader;
use umbra_runtime::SceneHost;
use umbra_script::{Engine, ScriptEntity, ScriptHost};

pub struct Fixture {
    pub scene: Arc<SceneHost>,
    pub engine: Engine,
    pub host: ScriptHost,
    assets: TempDir,
}

impl Fixture {
    pub fn asset_root(&self) -> &Path {
        self.assets.path()
    }

    pub fn spawn(&self, name: &str) -> ScriptEntity {
        self.host.bridge().create_entity(name)
    }
}

pub fn fixture() -> Fixture {
    let assets = tempfile::tempdir().unwrap();
    fs::write(assets.path().join("checker.png"), [0u8; 64]).unwrap();
    fs::write(assets.path().join("brick.png"), [0u8; 32]).unwrap();
    fs::write(assets.path().join("flat.glsl"), "void main() {}").unwrap();
    fs::write(assets.path().join("glow.glsl"), "void main() { gl_FragColor = vec4(1.0); }").unwrap();

    let scene = Arc::new(SceneHost::new(AssetLoader::new(assets.path())));
    let engine: Engine = scene.clone();
    let host = ScriptHost::new(engine.clone());
    Fixture {
        scene,
        engine,
        host,
        assets,
    }
}
