use serde::{Deserialize, Serialize};

use edda_core::{BBox, Point};

/// Maps server layout coordinates onto the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Center X in layout coordinates.
    pub center_x: f64,
    /// Center Y in layout coordinates.
    pub center_y: f64,
    /// Zoom level (pixels per layout unit).
    pub zoom: f64,
    /// Canvas width in pixels.
    pub canvas_width: f64,
    /// Canvas height in pixels.
    pub canvas_height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::identity(800.0, 600.0)
    }
}

impl Viewport {
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            center_x: 0.0,
            center_y: 0.0,
            zoom: 1.0,
            canvas_width,
            canvas_height,
        }
    }

    /// A viewport where layout coordinates are already canvas pixels.
    pub fn identity(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            center_x: canvas_width / 2.0,
            center_y: canvas_height / 2.0,
            ..Self::new(canvas_width, canvas_height)
        }
    }

    /// Zoom to fit a bounding box, keeping `margin` pixels free on each side.
    pub fn fit_bbox(&mut self, bbox: &BBox, margin: f64) {
        self.center_x = bbox.center().x;
        self.center_y = bbox.center().y;

        let usable_w = (self.canvas_width - 2.0 * margin).max(1.0);
        let usable_h = (self.canvas_height - 2.0 * margin).max(1.0);
        let zoom_x = if bbox.width() > 0.0 {
            usable_w / bbox.width()
        } else {
            f64::INFINITY
        };
        let zoom_y = if bbox.height() > 0.0 {
            usable_h / bbox.height()
        } else {
            f64::INFINITY
        };

        // A single server (or servers on one point) has nothing to scale.
        let zoom = zoom_x.min(zoom_y);
        self.zoom = if zoom.is_finite() { zoom } else { 1.0 };
    }

    /// Convert a layout coordinate to a canvas coordinate.
    pub fn to_screen(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.center_x) * self.zoom + self.canvas_width / 2.0,
            (p.y - self.center_y) * self.zoom + self.canvas_height / 2.0,
        )
    }
}
