//! Recording a scene into a sequence of snapshots.
//!
//! Each frame applies the cues scheduled for it, advances the body by one
//! fixed tick and captures the pose. The stream is fingerprinted with BLAKE3
//! over its JSON-lines form, so two runs can be compared by hash alone.

use std::io::Write;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::pose::PoseSnapshot;
use crate::scene::{SceneSpec, MAX_FRAMES};

/// One recorded frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub index: u32,
    /// Simulation time after this frame's update, in seconds.
    pub time: f64,
    pub pose: PoseSnapshot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    pub frames: Vec<Frame>,
    /// Hex BLAKE3 hash of the JSON-lines stream.
    pub fingerprint: String,
}

impl Timeline {
    /// Validate `scene` and record all of its frames.
    pub fn record(scene: &SceneSpec) -> Result<Self, ConfigError> {
        Self::record_frames(scene, scene.frames)
    }

    /// Validate `scene` and record `frames` frames instead of the scene's own
    /// count. Cues scheduled past the end never fire.
    pub fn record_frames(scene: &SceneSpec, frames: u32) -> Result<Self, ConfigError> {
        scene.validate()?;
        if frames == 0 {
            return Err(ConfigError::InvalidScene("frames must be at least 1".to_string()));
        }
        if frames > MAX_FRAMES {
            return Err(ConfigError::InvalidScene(format!(
                "frames must be at most {}, got {}",
                MAX_FRAMES, frames
            )));
        }

        let dt = scene.dt();
        let mut body = scene.build_body();
        let mut hasher = blake3::Hasher::new();
        let mut recorded = Vec::with_capacity(frames as usize);

        for index in 0..frames {
            for cue in scene.cues_at(index) {
                debug!("frame {}: cue {:?}", index, cue.action);
                cue.action.apply(&mut body);
            }
            body.update(dt);
            let frame = Frame {
                index,
                time: f64::from(index + 1) * dt,
                pose: body.export_pose(),
            };
            hasher.update(&serde_json::to_vec(&frame)?);
            hasher.update(b"\n");
            recorded.push(frame);
        }

        let fingerprint = hasher.finalize().to_hex().to_string();
        debug!("recorded {} frames, fingerprint {}", recorded.len(), fingerprint);
        Ok(Self {
            frames: recorded,
            fingerprint,
        })
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Number of frames spent walking.
    pub fn walking_frames(&self) -> usize {
        self.frames
            .iter()
            .filter(|f| f.pose.state == crate::state::BehaviorState::Walking)
            .count()
    }

    /// Number of idle/walking changes between consecutive frames.
    pub fn transitions(&self) -> usize {
        self.frames
            .windows(2)
            .filter(|pair| pair[0].pose.state != pair[1].pose.state)
            .count()
    }

    /// Write the stream as JSON lines, the same bytes the fingerprint covers.
    pub fn write_json_lines<W: Write>(&self, mut writer: W) -> Result<(), ConfigError> {
        for frame in &self.frames {
            serde_json::to_writer(&mut writer, frame)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }
}
