use log::trace;
use serde::{Deserialize, Serialize};

use edda_core::{Point, ServerState};

use crate::style::{EdgeStyle, Palette};

/// One drawing layer. Coordinates are canvas pixels.
pub trait Surface {
    /// Reset the layer to blank, dropping any transform or paint state.
    fn clear(&mut self);
    fn draw_line(&mut self, from: Point, to: Point, style: &EdgeStyle);
    fn draw_broken_link(&mut self, from: Point, to: Point, style: &EdgeStyle);
    /// Arrow pointing at `to`.
    fn draw_arrow(&mut self, from: Point, to: Point, style: &EdgeStyle, head: f32);
    fn draw_server(&mut self, id: &str, at: Point, state: ServerState, palette: &Palette);
}

/// The named layers of the topology canvas, bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerName {
    Arrow,
    Server,
}

impl LayerName {
    pub const ALL: [LayerName; 2] = [LayerName::Arrow, LayerName::Server];

    pub fn as_str(&self) -> &'static str {
        match self {
            LayerName::Arrow => "arrow",
            LayerName::Server => "server",
        }
    }
}

/// The pair of surfaces a frame is drawn onto.
#[derive(Debug, Clone, Default)]
pub struct Canvases<S> {
    arrow: S,
    server: S,
}

impl<S: Surface> Canvases<S> {
    pub fn new(arrow: S, server: S) -> Self {
        Self { arrow, server }
    }

    pub fn layer(&self, name: LayerName) -> &S {
        match name {
            LayerName::Arrow => &self.arrow,
            LayerName::Server => &self.server,
        }
    }

    pub fn layer_mut(&mut self, name: LayerName) -> &mut S {
        match name {
            LayerName::Arrow => &mut self.arrow,
            LayerName::Server => &mut self.server,
        }
    }

    pub fn clear_layer(&mut self, name: LayerName) {
        trace!("clearing {} layer", name.as_str());
        self.layer_mut(name).clear();
    }
}
