//! # Edda Renderer
//!
//! Draws one frame of the cluster topology onto a pair of layered surfaces:
//! links, broken links and sync arrows on the "arrow" layer, server markers on
//! the "server" layer above it.
//!
//! Surfaces are pluggable. [`RecordingSurface`] captures JSON-serializable draw
//! commands for a web canvas; [`PixmapSurface`] rasterizes with tiny-skia.

pub mod error;
pub mod frame_renderer;
pub mod raster;
pub mod render_data;
pub mod style;
pub mod surface;
pub mod viewport;

pub use error::RenderError;
pub use frame_renderer::{render_frame, FrameRenderer, RenderOutcome, RenderStats};
pub use raster::PixmapSurface;
pub use render_data::{DrawCommand, RecordingSurface, RenderedFrame};
pub use style::{EdgeStyle, Palette, Rgba, StateColors, BROKEN_LINK_DASH};
pub use surface::{Canvases, LayerName, Surface};
pub use viewport::Viewport;
