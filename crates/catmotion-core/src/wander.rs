//! Random wandering as a renewal process.
//!
//! A countdown is armed with a duration drawn uniformly from the configured
//! interval. When it expires the caller rolls the wander chance, and the
//! countdown is re-armed with a fresh draw.

use log::debug;

use crate::config::WanderParams;
use crate::geometry::Point;
use crate::rng::DeterministicRng;

#[derive(Debug, Clone, PartialEq)]
pub struct WanderTimer {
    remaining: f64,
}

impl WanderTimer {
    pub fn armed(params: &WanderParams, rng: &mut DeterministicRng) -> Self {
        Self {
            remaining: rng.uniform(params.min_interval, params.max_interval),
        }
    }

    pub fn remaining(&self) -> f64 {
        self.remaining
    }

    /// Count down by `dt`. Returns true when the countdown expired this tick,
    /// in which case it has already been re-armed.
    pub fn tick(&mut self, dt: f64, params: &WanderParams, rng: &mut DeterministicRng) -> bool {
        self.remaining -= dt;
        if self.remaining < 0.0 {
            self.remaining = rng.uniform(params.min_interval, params.max_interval);
            true
        } else {
            false
        }
    }
}

/// Roll the wander chance and, on success, return the perturbed target
/// clamped into the world bounds.
pub fn perturb_target(target: Point, params: &WanderParams, rng: &mut DeterministicRng) -> Option<Point> {
    if !rng.chance(params.chance) {
        return None;
    }
    let offset = Point::new(
        rng.uniform(-params.max_offset, params.max_offset),
        rng.uniform(-params.max_offset, params.max_offset),
    );
    let next = params.bounds.clamp(target.add(offset));
    debug!(
        "wander: target ({:.1}, {:.1}) -> ({:.1}, {:.1})",
        target.x, target.y, next.x, next.y
    );
    Some(next)
}
