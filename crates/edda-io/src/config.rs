use std::path::Path;

use serde::{Deserialize, Serialize};

use edda_core::ServerPositions;
use edda_renderer::{Palette, Rgba, Viewport};

use crate::error::IoError;

/// Viewer settings stored next to a session's frame data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Scale and center the layout so every server is on screen.
    pub fit_to_servers: bool,
    /// Pixels kept free around the servers when fitting.
    pub margin: f64,
    pub background: Rgba,
    pub palette: Palette,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            canvas_height: 600,
            fit_to_servers: true,
            margin: 40.0,
            background: Rgba::WHITE,
            palette: Palette::default(),
        }
    }
}

impl ViewerConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| IoError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| IoError::json(path, e))
    }

    /// The viewport for drawing `positions` under these settings.
    pub fn viewport_for(&self, positions: &ServerPositions) -> Viewport {
        let width = self.canvas_width as f64;
        let height = self.canvas_height as f64;
        match positions.bbox() {
            Some(bbox) if self.fit_to_servers => {
                let mut viewport = Viewport::new(width, height);
                viewport.fit_bbox(&bbox, self.margin);
                viewport
            }
            _ => Viewport::identity(width, height),
        }
    }
}
