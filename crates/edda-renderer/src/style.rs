use serde::{Deserialize, Serialize};

use edda_core::ServerState;

/// RGBA colour, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// `[on, off]` pattern for broken links whose style sets no dash of its own.
pub const BROKEN_LINK_DASH: [f32; 2] = [6.0, 4.0];

/// Stroke style for one kind of edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeStyle {
    pub color: Rgba,
    pub width: f32,
    /// `[on, off]` dash lengths in pixels; `None` for a solid stroke.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dash: Option<[f32; 2]>,
}

impl EdgeStyle {
    pub fn solid(color: Rgba, width: f32) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    pub fn dashed(color: Rgba, width: f32, on: f32, off: f32) -> Self {
        Self {
            color,
            width,
            dash: Some([on, off]),
        }
    }

    /// This style as a broken link draws it: dashed, with
    /// [`BROKEN_LINK_DASH`] standing in for a missing pattern.
    pub fn as_broken(&self) -> Self {
        Self {
            dash: Some(self.dash.unwrap_or(BROKEN_LINK_DASH)),
            ..self.clone()
        }
    }
}

/// Marker colours keyed by server state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateColors {
    pub primary: Rgba,
    pub secondary: Rgba,
    pub arbiter: Rgba,
    pub recovering: Rgba,
    pub startup: Rgba,
    pub down: Rgba,
    pub unknown: Rgba,
}

impl Default for StateColors {
    fn default() -> Self {
        Self {
            primary: Rgba::rgb(46, 139, 87),
            secondary: Rgba::rgb(70, 130, 180),
            arbiter: Rgba::rgb(218, 165, 32),
            recovering: Rgba::rgb(255, 140, 0),
            startup: Rgba::rgb(186, 85, 211),
            down: Rgba::rgb(178, 34, 34),
            unknown: Rgba::rgb(128, 128, 128),
        }
    }
}

/// Everything that decides how a frame looks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub link: EdgeStyle,
    pub broken_link: EdgeStyle,
    pub sync: EdgeStyle,
    /// Arrowhead length in pixels.
    pub arrow_head: f32,
    /// Server marker radius in pixels.
    pub server_radius: f32,
    pub server_outline: Rgba,
    pub states: StateColors,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            link: EdgeStyle::solid(Rgba::rgb(96, 96, 96), 2.0),
            broken_link: EdgeStyle {
                dash: Some(BROKEN_LINK_DASH),
                ..EdgeStyle::solid(Rgba::rgb(200, 30, 30), 2.0)
            },
            sync: EdgeStyle::solid(Rgba::rgb(30, 90, 200), 2.0),
            arrow_head: 12.0,
            server_radius: 10.0,
            server_outline: Rgba::rgb(32, 32, 32),
            states: StateColors::default(),
        }
    }
}

impl Palette {
    pub fn state_color(&self, state: ServerState) -> Rgba {
        let s = &self.states;
        match state {
            ServerState::Primary => s.primary,
            ServerState::Secondary => s.secondary,
            ServerState::Arbiter => s.arbiter,
            ServerState::Recovering => s.recovering,
            ServerState::Startup => s.startup,
            ServerState::Down => s.down,
            ServerState::Unknown => s.unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_broken_link_is_dashed() {
        let palette = Palette::default();
        assert!(palette.link.dash.is_none());
        assert!(palette.sync.dash.is_none());
        assert_eq!(palette.broken_link.dash, Some(BROKEN_LINK_DASH));
    }

    #[test]
    fn test_state_colors_distinct() {
        let palette = Palette::default();
        assert_ne!(
            palette.state_color(ServerState::Primary),
            palette.state_color(ServerState::Down)
        );
        assert_eq!(
            palette.state_color(ServerState::Unknown),
            Rgba::rgb(128, 128, 128)
        );
    }

    #[test]
    fn test_palette_partial_json() {
        let json = r#"{ "server_radius": 4.0, "link": { "color": { "r": 1, "g": 2, "b": 3 }, "width": 1.5 } }"#;
        let palette: Palette = serde_json::from_str(json).unwrap();
        assert_eq!(palette.server_radius, 4.0);
        assert_eq!(palette.link.color, Rgba::rgb(1, 2, 3));
        assert_eq!(palette.link.width, 1.5);
        assert_eq!(palette.broken_link, Palette::default().broken_link);
    }

    #[test]
    fn test_rgba_alpha_defaults_opaque() {
        let c: Rgba = serde_json::from_str(r#"{ "r": 255, "g": 0, "b": 51 }"#).unwrap();
        assert_eq!(c, Rgba::new(255, 0, 51, 255));
    }
}
