//! Scene files: a scripted simulation described in JSON.
//!
//! ```json
//! {
//!   "seed": 42,
//!   "start": [400.0, 250.0],
//!   "fps": 60,
//!   "frames": 240,
//!   "params": { "speed": 40.0 },
//!   "cues": [ { "frame": 10, "action": { "type": "target", "x": 700.0, "y": 300.0 } } ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::body::{CatBody, DEFAULT_SEED};
use crate::config::BodyParams;
use crate::error::ConfigError;
use crate::geometry::Point;

/// Longest scene that can be recorded, about 28 minutes at 60 fps.
pub const MAX_FRAMES: u32 = 100_000;

fn default_seed() -> u32 {
    DEFAULT_SEED
}

fn default_start() -> [f64; 2] {
    [400.0, 250.0]
}

fn default_fps() -> u32 {
    60
}

fn default_frames() -> u32 {
    240
}

/// An input applied to the body at a given frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum CueAction {
    Target { x: f64, y: f64 },
    Pointer { x: f64, y: f64 },
    Speed { value: f64 },
    RandomTarget,
    Home,
}

impl CueAction {
    pub fn apply(&self, body: &mut CatBody) {
        match *self {
            CueAction::Target { x, y } => body.set_target(x, y),
            CueAction::Pointer { x, y } => {
                body.attract_toward(x, y);
            }
            CueAction::Speed { value } => body.set_speed(value),
            CueAction::RandomTarget => {
                body.random_target();
            }
            CueAction::Home => body.go_home(),
        }
    }

    fn is_finite(&self) -> bool {
        match *self {
            CueAction::Target { x, y } | CueAction::Pointer { x, y } => x.is_finite() && y.is_finite(),
            CueAction::Speed { value } => value.is_finite(),
            CueAction::RandomTarget | CueAction::Home => true,
        }
    }
}

/// A cue fires before the body is updated for `frame`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Cue {
    pub frame: u32,
    pub action: CueAction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneSpec {
    #[serde(default = "default_seed")]
    pub seed: u32,
    #[serde(default = "default_start")]
    pub start: [f64; 2],
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(default = "default_frames")]
    pub frames: u32,
    #[serde(default)]
    pub params: BodyParams,
    #[serde(default)]
    pub cues: Vec<Cue>,
}

impl Default for SceneSpec {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            start: default_start(),
            fps: default_fps(),
            frames: default_frames(),
            params: BodyParams::default(),
            cues: Vec::new(),
        }
    }
}

impl SceneSpec {
    /// Parse a scene from JSON. Does not validate.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a scene file. Does not validate.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::InvalidScene("fps must be at least 1".to_string()));
        }
        if self.frames == 0 {
            return Err(ConfigError::InvalidScene("frames must be at least 1".to_string()));
        }
        if self.frames > MAX_FRAMES {
            return Err(ConfigError::InvalidScene(format!(
                "frames must be at most {}, got {}",
                MAX_FRAMES, self.frames
            )));
        }
        if !self.start_point().is_finite() {
            return Err(ConfigError::NonFinite("start"));
        }
        self.params.validate()?;

        for (i, cue) in self.cues.iter().enumerate() {
            if cue.frame >= self.frames {
                return Err(ConfigError::InvalidScene(format!(
                    "cue {} at frame {} is past the last frame {}",
                    i,
                    cue.frame,
                    self.frames - 1
                )));
            }
            if !cue.action.is_finite() {
                return Err(ConfigError::InvalidScene(format!(
                    "cue {} at frame {} has a non-finite value",
                    i, cue.frame
                )));
            }
        }
        Ok(())
    }

    /// Fixed tick length in seconds.
    pub fn dt(&self) -> f64 {
        1.0 / f64::from(self.fps.max(1))
    }

    pub fn start_point(&self) -> Point {
        Point::from(self.start)
    }

    pub fn duration_seconds(&self) -> f64 {
        f64::from(self.frames) * self.dt()
    }

    /// A fresh body at the start position with this scene's params and seed.
    pub fn build_body(&self) -> CatBody {
        CatBody::with_params(self.start_point(), self.params.clone(), self.seed)
    }

    /// Cues for `frame`, in file order.
    pub fn cues_at(&self, frame: u32) -> impl Iterator<Item = &Cue> {
        self.cues.iter().filter(move |cue| cue.frame == frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = r#"{
        "seed": 42,
        "start": [400.0, 250.0],
        "fps": 60,
        "frames": 240,
        "params": { "speed": 40.0 },
        "cues": [ { "frame": 10, "action": { "type": "target", "x": 700.0, "y": 300.0 } } ]
    }"#;

    #[test]
    fn test_parse_example_scene() {
        let scene = SceneSpec::from_json(EXAMPLE).unwrap();
        assert_eq!(scene.seed, 42);
        assert_eq!(scene.params.speed, 40.0);
        assert_eq!(scene.params.max_speed, 2.0);
        assert_eq!(
            scene.cues[0].action,
            CueAction::Target { x: 700.0, y: 300.0 }
        );
        scene.validate().unwrap();
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let scene = SceneSpec::from_json("{}").unwrap();
        assert_eq!(scene, SceneSpec::default());
        assert!((scene.dt() - 1.0 / 60.0).abs() < 1e-15);
    }

    #[test]
    fn test_unit_cue_actions() {
        let json = r#"{"cues": [
            {"frame": 0, "action": {"type": "random_target"}},
            {"frame": 1, "action": {"type": "home"}},
            {"frame": 2, "action": {"type": "speed", "value": 1.5}},
            {"frame": 3, "action": {"type": "pointer", "x": 1.0, "y": 2.0}}
        ]}"#;
        let scene = SceneSpec::from_json(json).unwrap();
        assert_eq!(scene.cues[0].action, CueAction::RandomTarget);
        assert_eq!(scene.cues[1].action, CueAction::Home);
        assert_eq!(scene.cues_at(2).count(), 1);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        assert!(matches!(
            SceneSpec::from_json(r#"{"sead": 1}"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(SceneSpec::from_json(r#"{"params": {"sped": 1.0}}"#).is_err());
        assert!(SceneSpec::from_json(r#"{"cues": [{"frame": 0, "action": {"type": "jump"}}]}"#).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_scenes() {
        let mut scene = SceneSpec {
            fps: 0,
            ..SceneSpec::default()
        };
        assert_eq!(scene.validate().unwrap_err().code(), "CONFIG_006");

        scene.fps = 30;
        scene.cues.push(Cue {
            frame: 240,
            action: CueAction::Home,
        });
        assert_eq!(scene.validate().unwrap_err().code(), "CONFIG_006");

        scene.cues.clear();
        scene.params.limb_limits.min = 45.0;
        assert_eq!(scene.validate().unwrap_err().code(), "CONFIG_004");

        scene.params = BodyParams::default();
        scene.start = [f64::NAN, 0.0];
        assert_eq!(scene.validate().unwrap_err().code(), "CONFIG_001");
    }

    #[test]
    fn test_validate_rejects_oversized_scenes() {
        let scene = SceneSpec::from_json(r#"{"frames": 4294967295}"#).unwrap();
        assert_eq!(scene.validate().unwrap_err().code(), "CONFIG_006");

        let scene = SceneSpec {
            frames: MAX_FRAMES,
            ..SceneSpec::default()
        };
        scene.validate().unwrap();

        let json = r#"{"params": {"wander": {"max_offset": 1e308, "chance": 1.0}}}"#;
        let scene = SceneSpec::from_json(json).unwrap();
        assert_eq!(scene.validate().unwrap_err().code(), "CONFIG_010");

        let scene = SceneSpec::from_json(r#"{"params": {"head_jitter": 1e308}}"#).unwrap();
        assert_eq!(scene.validate().unwrap_err().code(), "CONFIG_009");
    }

    #[test]
    fn test_apply_cues() {
        let scene = SceneSpec::default();
        let mut body = scene.build_body();
        CueAction::Target { x: 10.0, y: 20.0 }.apply(&mut body);
        assert_eq!(body.target(), Point::new(10.0, 20.0));
        CueAction::Home.apply(&mut body);
        assert_eq!(body.target(), Point::new(400.0, 250.0));
        CueAction::Speed { value: 1.2 }.apply(&mut body);
        assert_eq!(body.speed(), 1.2);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = SceneSpec::load("/nonexistent/scene.json").unwrap_err();
        assert_eq!(err.code(), "CONFIG_008");
    }
}
