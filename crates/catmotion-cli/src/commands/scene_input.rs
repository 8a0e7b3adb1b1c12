//! Scene loading shared by the commands.

use anyhow::{Context, Result};
use catmotion_core::SceneSpec;
use log::debug;

/// Load and validate a scene file.
pub(crate) fn load_valid_scene(path: &str) -> Result<SceneSpec> {
    let scene = SceneSpec::load(path).with_context(|| format!("Failed to load scene file: {}", path))?;
    scene
        .validate()
        .with_context(|| format!("Invalid scene: {}", path))?;
    debug!(
        "loaded scene {}: seed {}, {} frames at {} fps, {} cues",
        path,
        scene.seed,
        scene.frames,
        scene.fps,
        scene.cues.len()
    );
    Ok(scene)
}
