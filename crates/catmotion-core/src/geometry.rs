//! 2D points and rotation helpers.
//!
//! Angles are in degrees throughout the crate; screen coordinates have +y
//! pointing down, so a positive angle turns clockwise on screen.

use serde::{Deserialize, Serialize};

/// A point (or offset) in the 2D world plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing at `angle_degrees`, scaled by `length`.
    pub fn polar(angle_degrees: f64, length: f64) -> Self {
        let (sin, cos) = angle_degrees.to_radians().sin_cos();
        Self::new(cos * length, sin * length)
    }

    pub fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn scale(self, factor: f64) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance_to(self, other: Point) -> f64 {
        other.sub(self).length()
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }

    /// Direction of this vector in degrees, as `atan2(y, x)`.
    pub fn heading_degrees(self) -> f64 {
        self.y.atan2(self.x).to_degrees()
    }

    /// Rotate this vector about the origin.
    pub fn rotated(self, angle_degrees: f64) -> Point {
        let (sin, cos) = angle_degrees.to_radians().sin_cos();
        Point::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Point::new(x, y)
    }
}

/// Rotate `point` by `angle_degrees` about `pivot`.
pub fn rotate_point(point: Point, angle_degrees: f64, pivot: Point) -> Point {
    pivot.add(point.sub(pivot).rotated(angle_degrees))
}

/// Axis-aligned rectangle, used for the world bounds and random-target areas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Rect {
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Clamp a point into the rectangle (edges inclusive).
    pub fn clamp(&self, p: Point) -> Point {
        Point::new(
            p.x.max(self.min_x).min(self.max_x),
            p.y.max(self.min_y).min(self.max_y),
        )
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Finite, not inverted, and with finite width and height.
    pub fn is_well_formed(&self) -> bool {
        [self.min_x, self.min_y, self.max_x, self.max_y]
            .iter()
            .all(|v| v.is_finite())
            && self.min_x <= self.max_x
            && self.min_y <= self.max_y
            && (self.max_x - self.min_x).is_finite()
            && (self.max_y - self.min_y).is_finite()
    }
}
