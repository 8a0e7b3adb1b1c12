//! Software rasterizer.
//!
//! Coverage is sampled once per pixel at the pixel center, so output is
//! aliased but exactly reproducible across platforms.

use catmotion_core::geometry::{Point, Rect};

use crate::color::Color;
use crate::draw::{DrawList, Shape, Stroke};

/// Maps world coordinates into pixels: `pixel = world * scale + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f64,
    pub offset: Point,
}

impl Viewport {
    pub const IDENTITY: Viewport = Viewport {
        scale: 1.0,
        offset: Point::ORIGIN,
    };

    /// Fit `world` into a `width` x `height` image, preserving aspect ratio
    /// and centering the leftover space.
    pub fn fit(world: &Rect, width: u32, height: u32) -> Self {
        let world_w = world.max_x - world.min_x;
        let world_h = world.max_y - world.min_y;
        if !(world_w > 0.0 && world_h > 0.0) {
            return Self::IDENTITY;
        }
        let scale = (width as f64 / world_w).min(height as f64 / world_h);
        let offset = Point::new(
            (width as f64 - world_w * scale) / 2.0 - world.min_x * scale,
            (height as f64 - world_h * scale) / 2.0 - world.min_y * scale,
        );
        Self { scale, offset }
    }

    pub fn apply(&self, p: Point) -> Point {
        p.scale(self.scale).add(self.offset)
    }
}

/// An RGBA image buffer.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel data (RGBA, row-major).
    pub data: Vec<Color>,
}

impl Canvas {
    /// Create a new canvas filled with a color.
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            data: vec![fill; size],
        }
    }

    pub fn clear(&mut self, fill: Color) {
        self.data.fill(fill);
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.data[y as usize * self.width as usize + x as usize]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let idx = y as usize * self.width as usize + x as usize;
        self.data[idx] = color;
    }

    /// Composite `color` over the pixel at `(x, y)`.
    #[inline]
    pub fn blend(&mut self, x: u32, y: u32, color: Color) {
        let idx = y as usize * self.width as usize + x as usize;
        self.data[idx] = color.over(&self.data[idx]);
    }

    /// Convert to 8-bit RGBA bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.data.len() * 4);
        for color in &self.data {
            bytes.extend_from_slice(&color.to_rgba8());
        }
        bytes
    }

    /// Visit every pixel whose center lies in the (clipped) box, and paint
    /// it when `inside` says so.
    fn scan<F>(&mut self, min: Point, max: Point, color: Color, inside: F)
    where
        F: Fn(Point) -> bool,
    {
        if self.width == 0 || self.height == 0 {
            return;
        }
        if !(min.is_finite() && max.is_finite()) {
            return;
        }
        let x0 = min.x.floor().max(0.0) as u32;
        let y0 = min.y.floor().max(0.0) as u32;
        let x1 = max.x.ceil().min((self.width - 1) as f64);
        let y1 = max.y.ceil().min((self.height - 1) as f64);
        if x1 < 0.0 || y1 < 0.0 {
            return;
        }
        let (x1, y1) = (x1 as u32, y1 as u32);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let sample = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                if inside(sample) {
                    self.blend(x, y, color);
                }
            }
        }
    }

    pub fn fill_ellipse(&mut self, center: Point, rx: f64, ry: f64, rotation: f64, color: Color) {
        if !(rx > 0.0 && ry > 0.0) {
            return;
        }
        let reach = rx.max(ry);
        let r = Point::new(reach, reach);
        self.scan(center.sub(r), center.add(r), color, |p| {
            ellipse_norm(p, center, rx, ry, rotation) <= 1.0
        });
    }

    /// Ring of width `width` centered on the ellipse boundary.
    pub fn stroke_ellipse(&mut self, center: Point, rx: f64, ry: f64, rotation: f64, stroke: Stroke) {
        let half = stroke.width / 2.0;
        if !(half > 0.0 && rx > 0.0 && ry > 0.0) {
            return;
        }
        let (outer_x, outer_y) = (rx + half, ry + half);
        let (inner_x, inner_y) = (rx - half, ry - half);
        let reach = outer_x.max(outer_y);
        let r = Point::new(reach, reach);
        self.scan(center.sub(r), center.add(r), stroke.color, |p| {
            let in_outer = ellipse_norm(p, center, outer_x, outer_y, rotation) <= 1.0;
            let in_inner =
                inner_x > 0.0 && inner_y > 0.0 && ellipse_norm(p, center, inner_x, inner_y, rotation) < 1.0;
            in_outer && !in_inner
        });
    }

    /// Even-odd fill.
    pub fn fill_polygon(&mut self, points: &[Point], color: Color) {
        if points.len() < 3 {
            return;
        }
        let (min, max) = bounds(points, 0.0);
        self.scan(min, max, color, |p| point_in_polygon(p, points));
    }

    /// Thick polyline with round caps and joins.
    pub fn stroke_polyline(&mut self, points: &[Point], stroke: Stroke, closed: bool) {
        let half = stroke.width / 2.0;
        if points.is_empty() || !(half > 0.0) {
            return;
        }
        let (min, max) = bounds(points, half);
        let mut segments: Vec<(Point, Point)> = points.windows(2).map(|w| (w[0], w[1])).collect();
        if closed && points.len() > 2 {
            segments.push((points[points.len() - 1], points[0]));
        }
        if segments.is_empty() {
            segments.push((points[0], points[0]));
        }
        self.scan(min, max, stroke.color, |p| {
            segments
                .iter()
                .any(|&(a, b)| distance_to_segment(p, a, b) <= half)
        });
    }

    pub fn draw_shape(&mut self, shape: &Shape) {
        match shape {
            Shape::Ellipse {
                center,
                rx,
                ry,
                rotation,
                fill,
                outline,
            } => {
                self.fill_ellipse(*center, *rx, *ry, *rotation, *fill);
                if let Some(stroke) = outline {
                    self.stroke_ellipse(*center, *rx, *ry, *rotation, *stroke);
                }
            }
            Shape::Polygon {
                points,
                fill,
                outline,
            } => {
                self.fill_polygon(points, *fill);
                if let Some(stroke) = outline {
                    self.stroke_polyline(points, *stroke, true);
                }
            }
            Shape::Polyline { points, stroke } => self.stroke_polyline(points, *stroke, false),
        }
    }

    /// Paint every part of `list` in order.
    pub fn draw_list(&mut self, list: &DrawList, viewport: &Viewport) {
        for part in list.parts() {
            let shape = part.shape.transformed(viewport.scale, viewport.offset);
            self.draw_shape(&shape);
        }
    }
}

/// `<= 1.0` inside the ellipse.
fn ellipse_norm(p: Point, center: Point, rx: f64, ry: f64, rotation: f64) -> f64 {
    let local = p.sub(center).rotated(-rotation);
    (local.x / rx).powi(2) + (local.y / ry).powi(2)
}

fn bounds(points: &[Point], pad: f64) -> (Point, Point) {
    let mut min = Point::new(f64::INFINITY, f64::INFINITY);
    let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points {
        min = Point::new(min.x.min(p.x), min.y.min(p.y));
        max = Point::new(max.x.max(p.x), max.y.max(p.y));
    }
    (
        Point::new(min.x - pad, min.y - pad),
        Point::new(max.x + pad, max.y + pad),
    )
}

fn point_in_polygon(p: Point, points: &[Point]) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (a, b) = (points[i], points[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let ab = b.sub(a);
    let len_sq = ab.x * ab.x + ab.y * ab.y;
    if len_sq == 0.0 {
        return p.distance_to(a);
    }
    let ap = p.sub(a);
    let t = ((ap.x * ab.x + ap.y * ab.y) / len_sq).clamp(0.0, 1.0);
    p.distance_to(a.add(ab.scale(t)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(1.0, 0.0, 0.0);

    fn painted(canvas: &Canvas) -> usize {
        canvas.data.iter().filter(|c| **c == RED).count()
    }

    #[test]
    fn test_fill_circle_area() {
        let mut canvas = Canvas::new(64, 64, Color::black());
        canvas.fill_ellipse(Point::new(32.0, 32.0), 10.0, 10.0, 0.0, RED);
        let area = painted(&canvas) as f64;
        let expected = std::f64::consts::PI * 100.0;
        assert!((area - expected).abs() < expected * 0.05, "area {}", area);
        assert_eq!(canvas.get(32, 32), RED);
        assert_eq!(canvas.get(0, 0), Color::black());
    }

    #[test]
    fn test_rotated_ellipse() {
        let mut flat = Canvas::new(64, 64, Color::black());
        flat.fill_ellipse(Point::new(32.0, 32.0), 20.0, 4.0, 0.0, RED);
        let mut upright = Canvas::new(64, 64, Color::black());
        upright.fill_ellipse(Point::new(32.0, 32.0), 20.0, 4.0, 90.0, RED);
        assert_eq!(flat.get(50, 32), RED);
        assert_ne!(flat.get(32, 50), RED);
        assert_eq!(upright.get(32, 50), RED);
        assert_ne!(upright.get(50, 32), RED);
    }

    #[test]
    fn test_polygon_fill() {
        let mut canvas = Canvas::new(20, 20, Color::black());
        let square = [
            Point::new(2.0, 2.0),
            Point::new(12.0, 2.0),
            Point::new(12.0, 12.0),
            Point::new(2.0, 12.0),
        ];
        canvas.fill_polygon(&square, RED);
        assert_eq!(painted(&canvas), 100);
    }

    #[test]
    fn test_polyline_round_caps() {
        let mut canvas = Canvas::new(40, 20, Color::black());
        let line = [Point::new(10.0, 10.0), Point::new(30.0, 10.0)];
        canvas.stroke_polyline(&line, Stroke::new(RED, 4.0), false);
        assert_eq!(canvas.get(20, 9), RED);
        assert_eq!(canvas.get(8, 9), RED);
        assert_ne!(canvas.get(20, 14), RED);
    }

    #[test]
    fn test_shapes_clip_to_canvas() {
        let mut canvas = Canvas::new(10, 10, Color::black());
        canvas.fill_ellipse(Point::new(-100.0, -100.0), 5.0, 5.0, 0.0, RED);
        canvas.fill_ellipse(Point::new(0.0, 0.0), 3.0, 3.0, 0.0, RED);
        canvas.fill_ellipse(Point::new(f64::NAN, 0.0), 3.0, 3.0, 0.0, RED);
        assert!(painted(&canvas) > 0);
        assert_eq!(canvas.get(9, 9), Color::black());
    }

    #[test]
    fn test_viewport_fit_centers() {
        let world = Rect::new(0.0, 0.0, 1000.0, 700.0);
        let vp = Viewport::fit(&world, 500, 500);
        assert_eq!(vp.scale, 0.5);
        assert_eq!(vp.apply(Point::new(0.0, 0.0)), Point::new(0.0, 75.0));
        assert_eq!(vp.apply(Point::new(1000.0, 700.0)), Point::new(500.0, 425.0));
    }
}
