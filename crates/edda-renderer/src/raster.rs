//! CPU rasterization of the canvas layers using tiny-skia.

use tiny_skia::{
    Color, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke,
    StrokeDash, Transform,
};

use edda_core::{Point, ServerState};

use crate::error::RenderError;
use crate::style::{EdgeStyle, Palette, Rgba};
use crate::surface::{Canvases, LayerName, Surface};

/// Arrowhead angle from the shaft, 35 degrees.
const HEAD_ANGLE: f32 = 0.610_865_2;

/// Outline width around server markers.
const SERVER_OUTLINE: f32 = 1.5;

/// A transparent RGBA layer backed by a [`Pixmap`].
#[derive(Debug, Clone)]
pub struct PixmapSurface {
    pixmap: Pixmap,
}

impl PixmapSurface {
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        let pixmap = Pixmap::new(width, height).ok_or(RenderError::SurfaceSize { width, height })?;
        Ok(Self { pixmap })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn stroke_segments(&mut self, segments: &[(Point, Point)], style: &EdgeStyle) {
        let mut pb = PathBuilder::new();
        for (from, to) in segments {
            pb.move_to(from.x as f32, from.y as f32);
            pb.line_to(to.x as f32, to.y as f32);
        }
        // Zero-length or non-finite input yields no path.
        let Some(path) = pb.finish() else {
            return;
        };

        let stroke = Stroke {
            width: style.width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            dash: style
                .dash
                .and_then(|[on, off]| StrokeDash::new(vec![on, off], 0.0)),
            ..Default::default()
        };
        self.pixmap
            .stroke_path(&path, &paint(style.color), &stroke, Transform::identity(), None);
    }
}

impl Surface for PixmapSurface {
    fn clear(&mut self) {
        self.pixmap.fill(Color::TRANSPARENT);
    }

    fn draw_line(&mut self, from: Point, to: Point, style: &EdgeStyle) {
        self.stroke_segments(&[(from, to)], style);
    }

    fn draw_broken_link(&mut self, from: Point, to: Point, style: &EdgeStyle) {
        self.stroke_segments(&[(from, to)], &style.as_broken());
    }

    fn draw_arrow(&mut self, from: Point, to: Point, style: &EdgeStyle, head: f32) {
        let mut segments = vec![(from, to)];
        if let Some((left, right)) = head_points(from, to, head as f64) {
            segments.push((to, left));
            segments.push((to, right));
        }
        // Heads are always solid, even for a dashed shaft.
        let shaft = EdgeStyle {
            dash: None,
            ..style.clone()
        };
        self.stroke_segments(&segments, &shaft);
    }

    fn draw_server(&mut self, _id: &str, at: Point, state: ServerState, palette: &Palette) {
        let Some(circle) =
            PathBuilder::from_circle(at.x as f32, at.y as f32, palette.server_radius)
        else {
            return;
        };
        self.pixmap.fill_path(
            &circle,
            &paint(palette.state_color(state)),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
        let outline = Stroke {
            width: SERVER_OUTLINE,
            ..Default::default()
        };
        self.pixmap.stroke_path(
            &circle,
            &paint(palette.server_outline),
            &outline,
            Transform::identity(),
            None,
        );
    }
}

impl Canvases<PixmapSurface> {
    /// Flatten both layers, arrows first, over a solid background.
    pub fn composite(&self, background: Rgba) -> Result<Pixmap, RenderError> {
        let arrow = self.layer(LayerName::Arrow);
        let mut out = Pixmap::new(arrow.width(), arrow.height()).ok_or(
            RenderError::SurfaceSize {
                width: arrow.width(),
                height: arrow.height(),
            },
        )?;
        out.fill(Color::from_rgba8(
            background.r,
            background.g,
            background.b,
            background.a,
        ));
        for name in LayerName::ALL {
            out.draw_pixmap(
                0,
                0,
                self.layer(name).pixmap().as_ref(),
                &PixmapPaint::default(),
                Transform::identity(),
                None,
            );
        }
        Ok(out)
    }
}

fn paint(color: Rgba) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

/// End points of the two arrowhead strokes for an arrow ending at `to`.
fn head_points(from: Point, to: Point, size: f64) -> Option<(Point, Point)> {
    let length = from.distance_to(&to);
    if length < f64::EPSILON || size <= 0.0 {
        return None;
    }
    // Unit vector pointing back along the shaft.
    let bx = (from.x - to.x) / length;
    let by = (from.y - to.y) / length;
    let (sin_a, cos_a) = (HEAD_ANGLE as f64).sin_cos();

    let left = Point::new(
        to.x + (bx * cos_a - by * sin_a) * size,
        to.y + (bx * sin_a + by * cos_a) * size,
    );
    let right = Point::new(
        to.x + (bx * cos_a + by * sin_a) * size,
        to.y + (-bx * sin_a + by * cos_a) * size,
    );
    Some((left, right))
}
