//! Property-based tests for the animation core.
//!
//! Uses proptest to check invariants over arbitrary inputs:
//! - joint clamping lands inside the limits and is idempotent
//! - angle normalization stays in (-180, 180]
//! - small-step easing never moves away from the target
//! - wander targets stay inside the world bounds
//! - limb angles stay inside their limits for any update sequence
//! - the body walks exactly when it is farther than the arrival threshold
//! - scene parsing and validation never panic
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p catmotion-tests --test proptest_properties
//! ```

use catmotion_core::body::walking_targets;
use catmotion_core::config::WanderParams;
use catmotion_core::wander::perturb_target;
use catmotion_core::{
    ease_angle, ease_value, normalize_degrees, BehaviorState, BodyParams, CatBody, Cue, CueAction,
    DeterministicRng, JointLimits, LimbId, Point, Rect, SceneSpec, SmoothingMode, Timeline, MAX_FRAMES,
};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn limits() -> impl Strategy<Value = JointLimits> {
    (-90.0..0.0f64, 0.0..90.0f64).prop_map(|(min, max)| JointLimits::new(min, max))
}

fn smoothing() -> impl Strategy<Value = SmoothingMode> {
    prop_oneof![Just(SmoothingMode::Linear), Just(SmoothingMode::Exponential)]
}

fn cue_action() -> impl Strategy<Value = CueAction> {
    prop_oneof![
        (0.0..1000.0f64, 0.0..700.0f64).prop_map(|(x, y)| CueAction::Target { x, y }),
        (0.0..1000.0f64, 0.0..700.0f64).prop_map(|(x, y)| CueAction::Pointer { x, y }),
        (-1.0..5.0f64).prop_map(|value| CueAction::Speed { value }),
        Just(CueAction::RandomTarget),
        Just(CueAction::Home),
    ]
}

// ============================================================================
// Angles and Limits
// ============================================================================

proptest! {
    #[test]
    fn clamp_lands_in_limits(limits in limits(), angle in -1e6..1e6f64) {
        let clamped = limits.clamp(angle);
        prop_assert!(limits.contains(clamped));
        prop_assert_eq!(limits.clamp(clamped), clamped);
    }

    #[test]
    fn clamp_keeps_angles_already_inside(limits in limits(), t in 0.0..=1.0f64) {
        let inside = limits.min + (limits.max - limits.min) * t;
        prop_assume!(limits.contains(inside));
        prop_assert_eq!(limits.clamp(inside), inside);
    }

    #[test]
    fn normalize_stays_in_half_open_range(raw in -1e7..1e7f64) {
        let n = normalize_degrees(raw);
        prop_assert!(n > -180.0 && n <= 180.0, "{} -> {}", raw, n);
        prop_assert_eq!(normalize_degrees(n), n);
    }

    #[test]
    fn easing_never_moves_away(
        current in -1000.0..1000.0f64,
        target in -1000.0..1000.0f64,
        rate in 0.0..10.0f64,
        dt in 0.0..0.1f64,
        mode in smoothing(),
    ) {
        let next = ease_value(current, target, rate, dt, mode);
        prop_assert!((target - next).abs() <= (target - current).abs() + 1e-9);
    }

    #[test]
    fn angle_easing_takes_the_short_way(
        current in -180.0..180.0f64,
        target in -180.0..180.0f64,
        rate in 0.0..10.0f64,
        dt in 0.0..0.1f64,
    ) {
        let next = ease_angle(current, target, rate, dt, SmoothingMode::Linear);
        let before = normalize_degrees(target - current).abs();
        let after = normalize_degrees(target - next).abs();
        prop_assert!(after <= before + 1e-9);
    }
}

// ============================================================================
// Gait and World Bounds
// ============================================================================

proptest! {
    #[test]
    fn gait_diagonals_match(cycle in -100.0..100.0f64, amplitude in 0.0..45.0f64) {
        let targets = walking_targets(cycle, amplitude);
        let get = |id: LimbId| targets.iter().find(|(l, _)| *l == id).map(|(_, a)| *a).unwrap();
        prop_assert_eq!(get(LimbId::FrontLeft), get(LimbId::BackRight));
        prop_assert_eq!(get(LimbId::FrontRight), get(LimbId::BackLeft));
        prop_assert!((get(LimbId::FrontLeft) + get(LimbId::FrontRight)).abs() < 1e-9);
    }

    #[test]
    fn rect_clamp_is_inside(x in -1e4..1e4f64, y in -1e4..1e4f64) {
        let world = Rect::new(50.0, 50.0, 950.0, 650.0);
        prop_assert!(world.contains(world.clamp(Point::new(x, y))));
    }

    #[test]
    fn wander_target_stays_in_bounds(
        seed in any::<u32>(),
        x in -500.0..1500.0f64,
        y in -500.0..1200.0f64,
        max_offset in 0.0..500.0f64,
    ) {
        let params = WanderParams { chance: 1.0, max_offset, ..WanderParams::default() };
        let mut rng = DeterministicRng::new(seed);
        let next = perturb_target(Point::new(x, y), &params, &mut rng);
        prop_assert!(next.is_some());
        prop_assert!(params.bounds.contains(next.unwrap()));
    }
}

// ============================================================================
// Body Invariants
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn limb_angles_respect_limits(
        seed in any::<u32>(),
        steps in prop::collection::vec((0.0..0.5f64, cue_action()), 1..120),
        mode in smoothing(),
    ) {
        let mut params = BodyParams::default();
        params.smoothing = mode;
        params.limb_smoothing = 8.0;
        let mut body = CatBody::with_params(Point::new(400.0, 250.0), params, seed);
        for (dt, action) in &steps {
            action.apply(&mut body);
            body.update(*dt);
            for limb in body.limbs() {
                prop_assert!(limb.limits().contains(limb.angle()), "{:?} at {}", limb.id(), limb.angle());
            }
            prop_assert!(body.position().is_finite());
            prop_assert!(body.speed() >= 0.0 && body.speed() <= body.params().max_speed);
        }
    }

    #[test]
    fn walking_iff_beyond_arrival_threshold(
        x in -1000.0..2000.0f64,
        y in -1000.0..2000.0f64,
        tx in -1000.0..2000.0f64,
        ty in -1000.0..2000.0f64,
        steps in 1usize..40,
    ) {
        let mut params = BodyParams::default();
        params.wander.chance = 0.0;
        let threshold = params.arrival_threshold;
        let mut body = CatBody::with_params(Point::new(x, y), params, 3);
        body.set_target(tx, ty);
        for _ in 0..steps {
            // The state is classified from the position before the step.
            let distance = body.target().sub(body.position()).length();
            body.update(1.0 / 60.0);
            prop_assert_eq!(body.state() == BehaviorState::Walking, distance > threshold, "distance {}", distance);
        }
    }

    #[test]
    fn recorded_scenes_have_one_frame_per_tick(
        seed in any::<u32>(),
        frames in 1u32..60,
        cues in prop::collection::vec((0u32..60, cue_action()), 0..6),
    ) {
        let cues = cues
            .into_iter()
            .map(|(frame, action)| Cue { frame: frame % frames, action })
            .collect();
        let scene = SceneSpec { seed, frames, cues, ..SceneSpec::default() };
        let timeline = Timeline::record(&scene).unwrap();
        prop_assert_eq!(timeline.len(), frames as usize);
        for (i, frame) in timeline.frames.iter().enumerate() {
            prop_assert_eq!(frame.index as usize, i);
        }
    }
}

// ============================================================================
// Parsing Robustness
// ============================================================================

proptest! {
    #[test]
    fn scene_parsing_never_panics(json in "\\PC{0,200}") {
        if let Ok(scene) = SceneSpec::from_json(&json) {
            let _ = scene.validate();
        }
    }

    #[test]
    fn scene_validation_never_panics(
        fps in any::<u32>(),
        frames in any::<u32>(),
        start_x in any::<f64>(),
        speed in any::<f64>(),
        cue_frame in any::<u32>(),
    ) {
        let mut scene = SceneSpec {
            fps,
            frames,
            start: [start_x, 250.0],
            cues: vec![Cue { frame: cue_frame, action: CueAction::Speed { value: speed } }],
            ..SceneSpec::default()
        };
        scene.params.speed = speed;
        let result = scene.validate();
        if fps == 0 || frames == 0 || frames > MAX_FRAMES || !start_x.is_finite() || !speed.is_finite() || speed < 0.0 {
            prop_assert!(result.is_err());
        }
    }
}
