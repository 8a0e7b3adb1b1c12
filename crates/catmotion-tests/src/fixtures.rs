//! Scene fixtures written to temporary directories.

use std::fs;
use std::path::{Path, PathBuf};

use catmotion_core::{Cue, CueAction, SceneSpec};
use tempfile::TempDir;

/// A temp directory holding scene files for CLI-level tests.
pub struct SceneFixture {
    pub root: TempDir,
}

impl SceneFixture {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Write raw JSON as `<name>.json` and return its path.
    pub fn add_raw(&self, name: &str, json: &str) -> PathBuf {
        let path = self.root.path().join(format!("{}.json", name));
        fs::write(&path, json).expect("Failed to write scene file");
        path
    }

    pub fn add_scene(&self, name: &str, scene: &SceneSpec) -> PathBuf {
        let json = serde_json::to_string_pretty(scene).expect("Failed to serialize scene");
        self.add_raw(name, &json)
    }
}

impl Default for SceneFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A short walk: idle for a few frames, then head east.
pub fn walk_scene(seed: u32, frames: u32) -> SceneSpec {
    SceneSpec {
        seed,
        frames,
        cues: vec![Cue {
            frame: 3,
            action: CueAction::Target { x: 700.0, y: 300.0 },
        }],
        ..SceneSpec::default()
    }
}

/// Exercise every cue type once.
pub fn busy_scene(seed: u32) -> SceneSpec {
    let cue = |frame, action| Cue { frame, action };
    SceneSpec {
        seed,
        frames: 180,
        cues: vec![
            cue(0, CueAction::Speed { value: 2.0 }),
            cue(10, CueAction::RandomTarget),
            cue(60, CueAction::Pointer { x: 420.0, y: 260.0 }),
            cue(90, CueAction::Target { x: 150.0, y: 500.0 }),
            cue(150, CueAction::Home),
        ],
        ..SceneSpec::default()
    }
}
