//! catmotion core
//!
//! Deterministic procedural animation of a 2D cat: four articulated limbs, a
//! five-link tail, a head and a body position/heading, driven by an
//! idle/walking state machine.
//!
//! # Features
//!
//! - **Body**: `update(dt)` advances gait, heading, head jitter, tail wave,
//!   blink/ear-twitch timers and the wander countdown
//! - **Pose export**: self-contained world-space snapshots for any renderer
//! - **Scenes**: JSON-scripted simulations with timed input cues
//! - **Timeline**: recorded snapshot streams with a BLAKE3 fingerprint
//! - **Driver**: a fixed-cadence tick loop on its own thread
//!
//! # Example
//!
//! ```
//! use catmotion_core::CatBody;
//!
//! let mut cat = CatBody::new(400.0, 250.0);
//! cat.set_target(600.0, 300.0);
//! for _ in 0..60 {
//!     cat.update(1.0 / 60.0);
//! }
//! let pose = cat.export_pose();
//! assert_eq!(pose.tail.len(), 5);
//! ```
//!
//! # Determinism
//!
//! - Same seed + same inputs = identical snapshots
//! - PCG32 RNG is used for all random operations
//! - Timelines are fingerprinted over their JSON-lines form

pub mod angle;
pub mod body;
pub mod config;
pub mod driver;
pub mod error;
pub mod geometry;
pub mod limb;
pub mod pose;
pub mod rng;
pub mod scene;
pub mod state;
pub mod tail;
pub mod timeline;
pub mod wander;

// Re-export main types for convenience
pub use angle::{ease_angle, ease_value, normalize_degrees};
pub use body::{CatBody, DEFAULT_SEED};
pub use config::{ArrivalMode, BodyParams, PulseMode, SmoothingMode, TAIL_SEGMENTS};
pub use driver::{DriverCommand, DriverConfig, DriverHandle, DriverSummary};
pub use error::ConfigError;
pub use geometry::{rotate_point, Point, Rect};
pub use limb::{JointLimits, Limb, LimbId};
pub use pose::{BodyPose, HeadPose, LimbPose, PoseSnapshot, TailLink};
pub use rng::DeterministicRng;
pub use scene::{Cue, CueAction, SceneSpec, MAX_FRAMES};
pub use state::BehaviorState;
pub use tail::{Tail, TailSegment};
pub use timeline::{Frame, Timeline};
