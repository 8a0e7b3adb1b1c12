//! Snapshot to pixels.

use catmotion_core::geometry::Rect;
use catmotion_core::pose::PoseSnapshot;
use log::trace;

use crate::canvas::{Canvas, Viewport};
use crate::color::Palette;
use crate::draw::{DrawDiff, DrawList};

/// The world area the cat roams in by default.
pub const DEFAULT_WORLD: Rect = Rect::new(0.0, 0.0, 1000.0, 700.0);

/// Retained renderer: remembers the previous frame's draw list so each new
/// frame can report what changed.
#[derive(Debug, Clone)]
pub struct Renderer {
    width: u32,
    height: u32,
    palette: Palette,
    viewport: Viewport,
    previous: Option<DrawList>,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_world(width, height, &DEFAULT_WORLD)
    }

    pub fn with_world(width: u32, height: u32, world: &Rect) -> Self {
        Self {
            width,
            height,
            palette: Palette::default(),
            viewport: Viewport::fit(world, width, height),
            previous: None,
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Draw one snapshot onto a fresh canvas.
    pub fn render(&self, pose: &PoseSnapshot) -> Canvas {
        let list = DrawList::build(pose, &self.palette);
        self.rasterize(&list)
    }

    /// Draw one snapshot and report which parts changed since the last call.
    pub fn render_frame(&mut self, pose: &PoseSnapshot) -> (Canvas, DrawDiff) {
        let list = DrawList::build(pose, &self.palette);
        let diff = match &self.previous {
            Some(previous) => list.diff(previous),
            None => list.diff(&DrawList::new()),
        };
        trace!(
            "frame: {} added, {} changed, {} removed",
            diff.added.len(),
            diff.changed.len(),
            diff.removed.len()
        );
        let canvas = self.rasterize(&list);
        self.previous = Some(list);
        (canvas, diff)
    }

    fn rasterize(&self, list: &DrawList) -> Canvas {
        let mut canvas = Canvas::new(self.width, self.height, self.palette.background);
        canvas.draw_list(list, &self.viewport);
        canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catmotion_core::body::CatBody;

    #[test]
    fn test_render_is_deterministic() {
        let pose = CatBody::new(400.0, 250.0).export_pose();
        let renderer = Renderer::new(200, 140);
        assert_eq!(renderer.render(&pose).data, renderer.render(&pose).data);
    }

    #[test]
    fn test_cat_painted_over_background() {
        let pose = CatBody::new(500.0, 350.0).export_pose();
        let renderer = Renderer::new(1000, 700);
        let canvas = renderer.render(&pose);
        let bg = renderer.palette().background;
        assert_eq!(canvas.get(10, 10), bg);
        // Head center sits 35 units ahead of the body center.
        assert_ne!(canvas.get(535, 350), bg);
        // Body highlight just above the tail root.
        assert_eq!(canvas.get(500, 343), renderer.palette().highlight);
    }

    #[test]
    fn test_first_frame_reports_everything_added() {
        let mut body = CatBody::new(400.0, 250.0);
        let mut renderer = Renderer::new(100, 70);
        let (_, first) = renderer.render_frame(&body.export_pose());
        assert_eq!(first.added.len(), 24);
        assert!(first.changed.is_empty());

        body.set_target(800.0, 250.0);
        body.update(1.0 / 60.0);
        let (_, second) = renderer.render_frame(&body.export_pose());
        assert!(second.changed.contains(&"body".to_string()));
    }
}
