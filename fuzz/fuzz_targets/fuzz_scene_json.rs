#![no_main]

use catmotion_core::{SceneSpec, Timeline};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(scene) = SceneSpec::from_json(text) else {
        return;
    };
    if scene.validate().is_err() {
        return;
    }
    // Keep runs short; long scenes only repeat the same per-tick work.
    let frames = scene.frames.min(120);
    if let Ok(timeline) = Timeline::record_frames(&scene, frames) {
        assert_eq!(timeline.len(), frames as usize);
    }
});
