//! JSON output types for the `--json` flag.
//!
//! These shapes are stable so scripts can parse CLI output.

use catmotion_core::{ConfigError, SceneSpec, Timeline};
use serde::{Deserialize, Serialize};

/// Error codes for CLI-level failures. Scene errors pass through their own
/// `CONFIG_xxx` codes.
pub mod error_codes {
    /// Serialization of the output itself failed
    pub const JSON_SERIALIZE: &str = "CLI_001";
    /// Rendering or encoding failed
    pub const RENDER: &str = "CLI_002";
    /// Scene could not be loaded for a reason without its own code
    pub const SCENE_LOAD: &str = "CLI_003";
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g. "CONFIG_004")
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
        }
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn from_config(err: &ConfigError, file: &str) -> Self {
        Self::new(err.code(), err.to_string()).with_file(file)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SceneSummary {
    pub seed: u32,
    pub fps: u32,
    pub frames: u32,
    pub duration_seconds: f64,
    pub cues: usize,
}

impl SceneSummary {
    pub fn of(scene: &SceneSpec) -> Self {
        Self {
            seed: scene.seed,
            fps: scene.fps,
            frames: scene.frames,
            duration_seconds: scene.duration_seconds(),
            cues: scene.cues.len(),
        }
    }
}

/// Output of `validate --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidateOutput {
    pub success: bool,
    pub errors: Vec<JsonError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene: Option<SceneSummary>,
}

impl ValidateOutput {
    pub fn success(scene: &SceneSpec) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            scene: Some(SceneSummary::of(scene)),
        }
    }

    pub fn failure(errors: Vec<JsonError>, scene: Option<&SceneSpec>) -> Self {
        Self {
            success: false,
            errors,
            scene: scene.map(SceneSummary::of),
        }
    }
}

/// Output of `simulate --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulateOutput {
    pub success: bool,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub errors: Vec<JsonError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<SimulateResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulateResult {
    pub frames: usize,
    pub fingerprint: String,
    pub walking_frames: usize,
    pub transitions: usize,
    pub final_position: [f64; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl SimulateResult {
    pub fn of(timeline: &Timeline, output: Option<&str>) -> Self {
        let final_position = timeline
            .last()
            .map(|f| [f.pose.body.position.x, f.pose.body.position.y])
            .unwrap_or_default();
        Self {
            frames: timeline.len(),
            fingerprint: timeline.fingerprint.clone(),
            walking_frames: timeline.walking_frames(),
            transitions: timeline.transitions(),
            final_position,
            output: output.map(str::to_string),
        }
    }
}

/// Print `value` as pretty JSON. Falls back to a minimal error object if
/// serialization fails.
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => println!(
            "{{\"success\":false,\"errors\":[{{\"code\":\"{}\",\"message\":\"{}\"}}]}}",
            error_codes::JSON_SERIALIZE,
            e.to_string().replace('"', "'")
        ),
    }
}
