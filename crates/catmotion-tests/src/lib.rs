//! catmotion End-to-End Test Infrastructure
//!
//! Integration tests for the flows that matter across crates:
//!
//! - Scenarios: scripted bodies behave as documented (idle at target,
//!   single step, lazy retargeting, gait symmetry)
//! - **Determinism**: same seed and cues give identical timelines, draw
//!   lists and encoded images
//! - Properties: clamping, angle normalization and world bounds hold for
//!   arbitrary inputs
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p catmotion-tests
//! ```

pub mod determinism;
pub mod fixtures;

pub use determinism::{verify_determinism, DeterminismResult};
pub use fixtures::SceneFixture;
