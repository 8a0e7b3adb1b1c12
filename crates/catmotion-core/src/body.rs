//! The cat body: position, heading, limbs, tail, head and the idle/walking
//! state machine.
//!
//! [`CatBody::update`] is the only place animation state advances. It runs,
//! in order: walk-cycle phase, locomotion (or idle sway), head easing, tail
//! wave, timers, and the wander countdown.

use std::f64::consts::PI;

use log::{debug, trace};

use crate::angle::ease_angle;
use crate::config::{ArrivalMode, BodyParams, PulseMode};
use crate::geometry::Point;
use crate::limb::{Limb, LimbId};
use crate::pose::PoseSnapshot;
use crate::rng::DeterministicRng;
use crate::state::BehaviorState;
use crate::tail::Tail;
use crate::wander::{perturb_target, WanderTimer};

/// Seed used by [`CatBody::new`].
pub const DEFAULT_SEED: u32 = 0x00CA_7CA7;

/// Walking gait targets for a given cycle phase: diagonal pairs share a
/// phase (front-left with back-right, front-right with back-left).
pub fn walking_targets(cycle: f64, amplitude: f64) -> [(LimbId, f64); 4] {
    let lead = cycle.sin() * amplitude;
    let trail = (cycle + PI).sin() * amplitude;
    [
        (LimbId::FrontLeft, lead),
        (LimbId::FrontRight, trail),
        (LimbId::BackLeft, trail),
        (LimbId::BackRight, lead),
    ]
}

/// Idle sway targets: left legs lean one way, right legs the other.
pub fn idle_targets(state_timer: f64, frequency: f64, amplitude: f64) -> [(LimbId, f64); 4] {
    let sway = (state_timer * frequency).sin() * amplitude;
    LimbId::ALL.map(|id| (id, if id.is_left() { sway } else { -sway }))
}

#[derive(Debug, Clone)]
pub struct CatBody {
    params: BodyParams,
    position: Point,
    heading: f64,
    target: Point,
    speed: f64,
    walk_cycle: f64,
    state: BehaviorState,
    state_timer: f64,
    head_angle: f64,
    head_target_angle: f64,
    blink_timer: f64,
    ear_twitch_timer: f64,
    limbs: [Limb; 4],
    tail: Tail,
    wander: WanderTimer,
    rng: DeterministicRng,
    ticks: u64,
}

impl CatBody {
    /// A body with default parameters standing (and targeting) at `(x, y)`.
    pub fn new(x: f64, y: f64) -> Self {
        Self::with_params(Point::new(x, y), BodyParams::default(), DEFAULT_SEED)
    }

    /// A body with explicit parameters and seed. Parameters are used as given;
    /// call [`BodyParams::validate`] first for user-supplied values.
    pub fn with_params(position: Point, params: BodyParams, seed: u32) -> Self {
        let mut rng = DeterministicRng::new(seed);
        let limbs = LimbId::ALL.map(|id| {
            Limb::new(
                id,
                id.base_for_anchor(params.limb_anchor),
                params.limb_length,
                params.limb_limits,
                params.limb_smoothing,
            )
        });
        let tail = Tail::new(&params);
        let wander = WanderTimer::armed(&params.wander, &mut rng);
        Self {
            speed: params.speed,
            params,
            position,
            heading: 0.0,
            target: position,
            walk_cycle: 0.0,
            state: BehaviorState::Idle,
            state_timer: 0.0,
            head_angle: 0.0,
            head_target_angle: 0.0,
            blink_timer: 0.0,
            ear_twitch_timer: 0.0,
            limbs,
            tail,
            wander,
            rng,
            ticks: 0,
        }
    }

    /// Advance the animation by `dt` seconds.
    pub fn update(&mut self, dt: f64) {
        let p = &self.params;
        self.walk_cycle += p.walk_speed * dt;

        let delta = self.target.sub(self.position);
        let distance = delta.length();
        let state = BehaviorState::classify(distance, p.arrival_threshold);
        if state != self.state {
            debug!(
                "state {} -> {} at ({:.1}, {:.1}), {:.1} from target",
                self.state, state, self.position.x, self.position.y, distance
            );
            self.state = state;
        }

        match state {
            BehaviorState::Walking => {
                self.step_toward_target(delta, distance, dt);
                let targets = walking_targets(self.walk_cycle, self.params.gait_amplitude);
                self.drive_limbs(targets, dt);
            }
            BehaviorState::Idle => {
                let targets = idle_targets(
                    self.state_timer,
                    self.params.idle_sway_frequency,
                    self.params.idle_sway_amplitude,
                );
                self.drive_limbs(targets, dt);
            }
        }

        self.update_head(dt);
        self.tail
            .update(&self.params, self.heading, self.state_timer, dt);

        self.state_timer += dt;
        self.blink_timer += dt;
        self.ear_twitch_timer += dt;
        if let PulseMode::Periodic {
            blink_period,
            ear_twitch_period,
        } = self.params.pulses
        {
            self.blink_timer = self.blink_timer.rem_euclid(blink_period);
            self.ear_twitch_timer = self.ear_twitch_timer.rem_euclid(ear_twitch_period);
        }

        if self.wander.tick(dt, &self.params.wander, &mut self.rng) {
            if let Some(next) = perturb_target(self.target, &self.params.wander, &mut self.rng) {
                self.target = next;
            }
            self.state_timer = 0.0;
        }

        self.ticks += 1;
        trace!(
            "tick {} dt={:.4} pos=({:.2}, {:.2}) heading={:.2} state={}",
            self.ticks,
            dt,
            self.position.x,
            self.position.y,
            self.heading,
            self.state
        );
    }

    fn step_toward_target(&mut self, delta: Point, distance: f64, dt: f64) {
        if distance <= 0.0 {
            return;
        }
        let step = match self.params.arrival {
            ArrivalMode::Unclamped => self.speed * dt,
            ArrivalMode::Clamped => (self.speed * dt).min(distance),
        };
        self.position = self.position.add(delta.scale(step / distance));
        self.heading = ease_angle(
            self.heading,
            delta.heading_degrees(),
            self.params.heading_rate,
            dt,
            self.params.smoothing,
        );
    }

    fn drive_limbs(&mut self, targets: [(LimbId, f64); 4], dt: f64) {
        let mode = self.params.smoothing;
        for (limb, (id, angle)) in self.limbs.iter_mut().zip(targets) {
            debug_assert_eq!(limb.id(), id);
            limb.set_target_angle(angle);
            limb.update(dt, mode);
        }
    }

    fn update_head(&mut self, dt: f64) {
        let jitter = self.params.head_jitter;
        self.head_target_angle = self.heading + self.rng.uniform(-jitter, jitter);
        self.head_angle = ease_angle(
            self.head_angle,
            self.head_target_angle,
            self.params.head_rate,
            dt,
            self.params.smoothing,
        );
    }

    /// Set the point to walk to. Takes effect on the next `update`.
    pub fn set_target(&mut self, x: f64, y: f64) {
        self.target = Point::new(x, y);
    }

    /// Change walking speed, clamped into `[0, max_speed]`.
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed.max(0.0).min(self.params.max_speed);
    }

    /// Pointer attraction: when the pointer is close to the body, drag the
    /// target a little toward it. Returns whether the target moved.
    pub fn attract_toward(&mut self, pointer_x: f64, pointer_y: f64) -> bool {
        let pointer = Point::new(pointer_x, pointer_y);
        if self.position.distance_to(pointer) >= self.params.pointer.radius {
            return false;
        }
        let pull = pointer.sub(self.position).scale(self.params.pointer.pull);
        self.target = self.target.add(pull);
        true
    }

    /// Pick a target uniformly inside the configured random area.
    pub fn random_target(&mut self) -> Point {
        let area = self.params.random_area;
        let next = Point::new(
            self.rng.uniform(area.min_x, area.max_x),
            self.rng.uniform(area.min_y, area.max_y),
        );
        self.target = next;
        next
    }

    /// Walk back to the configured home point.
    pub fn go_home(&mut self) {
        self.target = self.params.home;
    }

    /// Immutable, self-contained snapshot of the current pose.
    pub fn export_pose(&self) -> PoseSnapshot {
        PoseSnapshot::capture(self)
    }

    pub fn params(&self) -> &BodyParams {
        &self.params
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn target(&self) -> Point {
        self.target
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn walk_cycle(&self) -> f64 {
        self.walk_cycle
    }

    pub fn state(&self) -> BehaviorState {
        self.state
    }

    pub fn state_timer(&self) -> f64 {
        self.state_timer
    }

    pub fn head_angle(&self) -> f64 {
        self.head_angle
    }

    pub fn head_target_angle(&self) -> f64 {
        self.head_target_angle
    }

    pub fn blink_timer(&self) -> f64 {
        self.blink_timer
    }

    pub fn ear_twitch_timer(&self) -> f64 {
        self.ear_twitch_timer
    }

    pub fn limbs(&self) -> &[Limb; 4] {
        &self.limbs
    }

    pub fn limb(&self, id: LimbId) -> &Limb {
        // LimbId::ALL order is the construction order.
        &self.limbs[id as usize]
    }

    pub fn tail(&self) -> &Tail {
        &self.tail
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
