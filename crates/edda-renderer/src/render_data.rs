use serde::{Deserialize, Serialize};

use edda_core::{Frame, Point, ServerId, ServerState};

use crate::style::{EdgeStyle, Palette, Rgba};
use crate::surface::{Canvases, LayerName, Surface};
use crate::viewport::Viewport;

/// A single drawing primitive, in the order it was issued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear,
    Line {
        from: Point,
        to: Point,
        style: EdgeStyle,
    },
    BrokenLink {
        from: Point,
        to: Point,
        style: EdgeStyle,
    },
    Arrow {
        from: Point,
        to: Point,
        style: EdgeStyle,
        head: f32,
    },
    Server {
        id: ServerId,
        at: Point,
        state: ServerState,
        radius: f32,
        fill: Rgba,
        outline: Rgba,
    },
}

/// A surface that records what it is asked to draw.
///
/// Clearing drops everything recorded so far and leaves a single
/// [`DrawCommand::Clear`], so the list always describes the current layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn draw_line(&mut self, from: Point, to: Point, style: &EdgeStyle) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            style: style.clone(),
        });
    }

    fn draw_broken_link(&mut self, from: Point, to: Point, style: &EdgeStyle) {
        self.commands.push(DrawCommand::BrokenLink {
            from,
            to,
            style: style.as_broken(),
        });
    }

    fn draw_arrow(&mut self, from: Point, to: Point, style: &EdgeStyle, head: f32) {
        self.commands.push(DrawCommand::Arrow {
            from,
            to,
            style: style.clone(),
            head,
        });
    }

    fn draw_server(&mut self, id: &str, at: Point, state: ServerState, palette: &Palette) {
        self.commands.push(DrawCommand::Server {
            id: id.to_string(),
            at,
            state,
            radius: palette.server_radius,
            fill: palette.state_color(state),
            outline: palette.server_outline,
        });
    }
}

/// Complete render data for one frame, as handed to a web frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedFrame {
    pub time: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub viewport: Viewport,
    pub arrow: Vec<DrawCommand>,
    pub server: Vec<DrawCommand>,
}

impl RenderedFrame {
    pub fn capture(
        time: u64,
        frame: &Frame,
        viewport: Viewport,
        canvases: &Canvases<RecordingSurface>,
    ) -> Self {
        Self {
            time,
            summary: frame.summary.clone(),
            viewport,
            arrow: canvases.layer(LayerName::Arrow).commands().to_vec(),
            server: canvases.layer(LayerName::Server).commands().to_vec(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
