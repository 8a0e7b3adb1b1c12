//! Single-segment limbs with clamped, eased joint angles.

use serde::{Deserialize, Serialize};

use crate::angle::ease_value;
use crate::config::SmoothingMode;
use crate::geometry::Point;

/// The four legs, in draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimbId {
    FrontLeft,
    FrontRight,
    BackLeft,
    BackRight,
}

impl LimbId {
    pub const ALL: [LimbId; 4] = [
        LimbId::FrontLeft,
        LimbId::FrontRight,
        LimbId::BackLeft,
        LimbId::BackRight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LimbId::FrontLeft => "front_left",
            LimbId::FrontRight => "front_right",
            LimbId::BackLeft => "back_left",
            LimbId::BackRight => "back_right",
        }
    }

    pub fn is_left(self) -> bool {
        matches!(self, LimbId::FrontLeft | LimbId::BackLeft)
    }

    pub fn is_front(self) -> bool {
        matches!(self, LimbId::FrontLeft | LimbId::FrontRight)
    }

    /// Base position relative to the body center for an anchor `(ax, ay)`:
    /// fronts at `-ax`, lefts at `-ay`.
    pub fn base_for_anchor(self, anchor: Point) -> Point {
        let x = if self.is_front() { -anchor.x } else { anchor.x };
        let y = if self.is_left() { -anchor.y } else { anchor.y };
        Point::new(x, y)
    }
}

impl std::fmt::Display for LimbId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Inclusive joint-angle range in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointLimits {
    pub min: f64,
    pub max: f64,
}

impl JointLimits {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp `angle` into the range. Unlike `f64::clamp` this does not panic
    /// on an inverted range; it yields `max` instead.
    #[inline]
    pub fn clamp(&self, angle: f64) -> f64 {
        angle.max(self.min).min(self.max)
    }

    pub fn contains(&self, angle: f64) -> bool {
        angle >= self.min && angle <= self.max
    }
}

/// One articulated leg.
#[derive(Debug, Clone, PartialEq)]
pub struct Limb {
    id: LimbId,
    base: Point,
    length: f64,
    limits: JointLimits,
    angle: f64,
    target_angle: f64,
    smoothing_rate: f64,
}

impl Limb {
    /// Create a limb at rest. The initial angle is clamped into `limits`.
    pub fn new(id: LimbId, base: Point, length: f64, limits: JointLimits, smoothing_rate: f64) -> Self {
        let angle = limits.clamp(0.0);
        Self {
            id,
            base,
            length,
            limits,
            angle,
            target_angle: angle,
            smoothing_rate,
        }
    }

    pub fn id(&self) -> LimbId {
        self.id
    }

    pub fn base(&self) -> Point {
        self.base
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn limits(&self) -> JointLimits {
        self.limits
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn target_angle(&self) -> f64 {
        self.target_angle
    }

    /// Store `angle` clamped into the joint limits as the new target.
    pub fn set_target_angle(&mut self, angle: f64) {
        self.target_angle = self.limits.clamp(angle);
    }

    /// Ease the current angle toward the target.
    ///
    /// With linear smoothing a large `dt` can overshoot the target; the
    /// result is clamped back into the joint limits either way.
    pub fn update(&mut self, dt: f64, mode: SmoothingMode) {
        let eased = ease_value(self.angle, self.target_angle, self.smoothing_rate, dt, mode);
        self.angle = self.limits.clamp(eased);
    }

    /// Paw position in the limb's local (unrotated) body frame.
    pub fn end_position(&self) -> Point {
        self.base.add(Point::polar(self.angle, self.length))
    }

    /// Knee position: halfway along the limb.
    pub fn mid_position(&self) -> Point {
        self.base.add(Point::polar(self.angle, self.length * 0.5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limb() -> Limb {
        Limb::new(
            LimbId::FrontLeft,
            Point::new(-25.0, -15.0),
            25.0,
            JointLimits::new(-30.0, 30.0),
            0.1,
        )
    }

    #[test]
    fn test_target_clamped() {
        let mut l = limb();
        l.set_target_angle(90.0);
        assert_eq!(l.target_angle(), 30.0);
        l.set_target_angle(-1000.0);
        assert_eq!(l.target_angle(), -30.0);
        l.set_target_angle(12.5);
        assert_eq!(l.target_angle(), 12.5);
    }

    #[test]
    fn test_update_eases_toward_target() {
        let mut l = limb();
        l.set_target_angle(20.0);
        l.update(1.0, SmoothingMode::Linear);
        assert!((l.angle() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_large_dt_never_leaves_limits() {
        let mut l = limb();
        l.set_target_angle(30.0);
        // rate * dt = 15: wild overshoot without the clamp.
        l.update(150.0, SmoothingMode::Linear);
        assert!(l.limits().contains(l.angle()));
    }

    #[test]
    fn test_end_and_mid_positions() {
        let l = limb();
        assert_eq!(l.end_position(), Point::new(0.0, -15.0));
        assert_eq!(l.mid_position(), Point::new(-12.5, -15.0));
    }

    #[test]
    fn test_limb_names_and_sides() {
        assert_eq!(LimbId::BackRight.name(), "back_right");
        assert!(LimbId::BackLeft.is_left());
        assert!(!LimbId::FrontRight.is_left());
        assert_eq!(
            LimbId::FrontLeft.base_for_anchor(Point::new(25.0, 15.0)),
            Point::new(-25.0, -15.0)
        );
        assert_eq!(
            LimbId::BackRight.base_for_anchor(Point::new(25.0, 15.0)),
            Point::new(25.0, 15.0)
        );
    }
}
