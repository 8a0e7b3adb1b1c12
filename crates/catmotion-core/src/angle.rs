//! Angle helpers shared by the body, head and tail easing.

use crate::config::SmoothingMode;

/// Normalize a signed angle difference (degrees) into `(-180, 180]`.
///
/// NaN passes through unchanged.
pub fn normalize_degrees(diff: f64) -> f64 {
    let d = diff % 360.0;
    if d > 180.0 {
        d - 360.0
    } else if d <= -180.0 {
        d + 360.0
    } else {
        d
    }
}

/// Move `current` toward `target` along the shorter way round the circle.
///
/// The result is not wrapped: headings accumulate freely and only their
/// differences are normalized.
pub fn ease_angle(current: f64, target: f64, rate: f64, dt: f64, mode: SmoothingMode) -> f64 {
    current + normalize_degrees(target - current) * mode.factor(rate, dt)
}

/// Move `current` toward `target` linearly in value space.
pub fn ease_value(current: f64, target: f64, rate: f64, dt: f64, mode: SmoothingMode) -> f64 {
    current + (target - current) * mode.factor(rate, dt)
}
