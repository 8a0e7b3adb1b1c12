//! Draw lists: a snapshot turned into named, colored shapes.
//!
//! Parts are keyed by what they are (`body`, `paw_front_left`, `left_eye`,
//! ...) and kept in paint order. A list is rebuilt from scratch every frame;
//! [`DrawList::diff`] tells a retained-mode consumer which parts to touch.

use catmotion_core::geometry::{rotate_point, Point};
use catmotion_core::pose::PoseSnapshot;

use crate::color::{Color, Palette};

/// Outline or line style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

impl Stroke {
    pub const fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Filled ellipse with semi-axes `rx`, `ry`, rotated by `rotation`
    /// degrees about its center.
    Ellipse {
        center: Point,
        rx: f64,
        ry: f64,
        rotation: f64,
        fill: Color,
        outline: Option<Stroke>,
    },
    /// Closed, filled polygon.
    Polygon {
        points: Vec<Point>,
        fill: Color,
        outline: Option<Stroke>,
    },
    /// Open polyline with round caps and joins.
    Polyline { points: Vec<Point>, stroke: Stroke },
}

impl Shape {
    pub fn circle(center: Point, radius: f64, fill: Color, outline: Option<Stroke>) -> Self {
        Shape::Ellipse {
            center,
            rx: radius,
            ry: radius,
            rotation: 0.0,
            fill,
            outline,
        }
    }

    pub fn line(from: Point, to: Point, stroke: Stroke) -> Self {
        Shape::Polyline {
            points: vec![from, to],
            stroke,
        }
    }

    /// Rotate the shape by `angle` degrees about `pivot`.
    pub fn rotated_about(self, angle: f64, pivot: Point) -> Self {
        match self {
            Shape::Ellipse {
                center,
                rx,
                ry,
                rotation,
                fill,
                outline,
            } => Shape::Ellipse {
                center: rotate_point(center, angle, pivot),
                rx,
                ry,
                rotation: rotation + angle,
                fill,
                outline,
            },
            Shape::Polygon {
                points,
                fill,
                outline,
            } => Shape::Polygon {
                points: points.into_iter().map(|p| rotate_point(p, angle, pivot)).collect(),
                fill,
                outline,
            },
            Shape::Polyline { points, stroke } => Shape::Polyline {
                points: points.into_iter().map(|p| rotate_point(p, angle, pivot)).collect(),
                stroke,
            },
        }
    }

    /// Map into pixel space: `p * scale + offset`. Radii and widths scale too.
    pub fn transformed(&self, scale: f64, offset: Point) -> Shape {
        let map = |p: &Point| p.scale(scale).add(offset);
        let map_stroke = |s: &Stroke| Stroke::new(s.color, s.width * scale);
        match self {
            Shape::Ellipse {
                center,
                rx,
                ry,
                rotation,
                fill,
                outline,
            } => Shape::Ellipse {
                center: map(center),
                rx: rx * scale,
                ry: ry * scale,
                rotation: *rotation,
                fill: *fill,
                outline: outline.as_ref().map(map_stroke),
            },
            Shape::Polygon {
                points,
                fill,
                outline,
            } => Shape::Polygon {
                points: points.iter().map(map).collect(),
                fill: *fill,
                outline: outline.as_ref().map(map_stroke),
            },
            Shape::Polyline { points, stroke } => Shape::Polyline {
                points: points.iter().map(map).collect(),
                stroke: map_stroke(stroke),
            },
        }
    }

    /// Rough anchor point, used for logging and tests.
    pub fn anchor(&self) -> Option<Point> {
        match self {
            Shape::Ellipse { center, .. } => Some(*center),
            Shape::Polygon { points, .. } | Shape::Polyline { points, .. } => points.first().copied(),
        }
    }
}

/// One named shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub key: String,
    pub shape: Shape,
}

/// Keys added, changed and removed between two frames.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawDiff {
    pub added: Vec<String>,
    pub changed: Vec<String>,
    pub removed: Vec<String>,
}

impl DrawDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.changed.is_empty() && self.removed.is_empty()
    }
}

/// Parts in paint order, unique by key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    parts: Vec<Part>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a part on top, or replace an existing part with the same key in place.
    pub fn insert(&mut self, key: impl Into<String>, shape: Shape) {
        let key = key.into();
        match self.parts.iter_mut().find(|p| p.key == key) {
            Some(part) => part.shape = shape,
            None => self.parts.push(Part { key, shape }),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Shape> {
        self.parts.iter().find(|p| p.key == key).map(|p| &p.shape)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|p| p.key.as_str())
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// What changed going from `previous` to `self`.
    pub fn diff(&self, previous: &DrawList) -> DrawDiff {
        let mut diff = DrawDiff::default();
        for part in &self.parts {
            match previous.get(&part.key) {
                None => diff.added.push(part.key.clone()),
                Some(old) if *old != part.shape => diff.changed.push(part.key.clone()),
                Some(_) => {}
            }
        }
        for part in &previous.parts {
            if !self.contains(&part.key) {
                diff.removed.push(part.key.clone());
            }
        }
        diff
    }

    /// Build the full cat for one snapshot.
    pub fn build(pose: &PoseSnapshot, palette: &Palette) -> Self {
        let mut list = DrawList::new();
        add_body(&mut list, pose, palette);
        add_limbs(&mut list, pose, palette);
        add_tail(&mut list, pose, palette);
        add_head(&mut list, pose, palette);
        add_whiskers(&mut list, pose, palette);
        list
    }
}

fn add_body(list: &mut DrawList, pose: &PoseSnapshot, palette: &Palette) {
    let body = &pose.body;
    list.insert(
        "body",
        Shape::Ellipse {
            center: body.position,
            rx: body.width / 2.0,
            ry: body.height / 2.0,
            rotation: body.heading,
            fill: palette.body,
            outline: Some(Stroke::new(palette.highlight, 2.0)),
        },
    );
    list.insert(
        "body_highlight",
        Shape::Ellipse {
            center: body.position,
            rx: body.width / 3.0,
            ry: body.height / 3.0,
            rotation: body.heading,
            fill: palette.highlight,
            outline: None,
        },
    );
}

fn add_limbs(list: &mut DrawList, pose: &PoseSnapshot, palette: &Palette) {
    for (id, limb) in &pose.limbs {
        list.insert(
            format!("limb_{}", id),
            Shape::line(limb.base, limb.end, Stroke::new(palette.limbs, 8.0)),
        );
        list.insert(
            format!("paw_{}", id),
            Shape::circle(limb.end, 6.0, palette.paws, Some(Stroke::new(palette.limbs, 2.0))),
        );
    }
}

fn add_tail(list: &mut DrawList, pose: &PoseSnapshot, palette: &Palette) {
    let points = pose.tail_polyline();
    if points.len() < 2 {
        return;
    }
    list.insert(
        "tail",
        Shape::Polyline {
            points,
            stroke: Stroke::new(palette.tail, 6.0),
        },
    );
    if let Some(tip) = pose.tail_tip() {
        list.insert(
            "tail_tip",
            Shape::circle(tip, 4.0, palette.tail, Some(Stroke::new(palette.highlight, 1.0))),
        );
    }
}

fn add_head(list: &mut DrawList, pose: &PoseSnapshot, palette: &Palette) {
    let c = pose.head.position;
    let angle = pose.head.heading;
    let at = |dx: f64, dy: f64| Point::new(c.x + dx, c.y + dy);
    let outline = Some(Stroke::new(palette.highlight, 1.0));
    let mut head_part = |key: &str, shape: Shape| list.insert(key, shape.rotated_about(angle, c));

    head_part(
        "head",
        Shape::circle(c, 20.0, palette.body, Some(Stroke::new(palette.highlight, 2.0))),
    );

    let lift = if pose.ear_twitch { 2.0 } else { 0.0 };
    for (key, side) in [("left_ear", -1.0), ("right_ear", 1.0)] {
        head_part(
            key,
            Shape::Polygon {
                points: vec![
                    at(side * 15.0, -25.0 + lift),
                    at(side * 25.0, -35.0 + lift),
                    at(side * 15.0, -15.0 + lift),
                ],
                fill: palette.ears,
                outline,
            },
        );
    }

    for (eye, pupil, side) in [("left_eye", "left_pupil", -1.0), ("right_eye", "right_pupil", 1.0)] {
        if pose.blink {
            head_part(
                eye,
                Shape::line(
                    at(side * 12.0, -5.0),
                    at(side * 6.0, -5.0),
                    Stroke::new(palette.highlight, 2.0),
                ),
            );
        } else {
            head_part(eye, Shape::circle(at(side * 9.0, -5.0), 3.0, palette.eyes, outline));
            head_part(pupil, Shape::circle(at(side * 9.0, -5.0), 1.0, palette.pupils, None));
        }
    }

    head_part("nose", Shape::circle(at(0.0, 4.0), 2.0, palette.nose, outline));
}

/// Whiskers stay level whatever the head does.
fn add_whiskers(list: &mut DrawList, pose: &PoseSnapshot, palette: &Palette) {
    let c = pose.head.position;
    let stroke = Stroke::new(palette.whiskers, 2.0);
    let rows = [(5.0, 3.0), (8.0, 8.0), (11.0, 13.0)];
    for (side_name, side) in [("left", -1.0), ("right", 1.0)] {
        for (i, (root_y, tip_y)) in rows.iter().enumerate() {
            list.insert(
                format!("{}_whisker_{}", side_name, i + 1),
                Shape::line(
                    Point::new(c.x + side * 20.0, c.y + root_y),
                    Point::new(c.x + side * 35.0, c.y + tip_y),
                    stroke,
                ),
            );
        }
    }
}
