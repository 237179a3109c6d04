use std::path::Path;

use log::debug;

use edda_renderer::{Canvases, PixmapSurface, RenderedFrame, Rgba};

use crate::error::IoError;

/// File name for the output of frame `time`, sortable by time.
pub fn frame_file_name(time: u64, extension: &str) -> String {
    format!("frame-{:08}.{}", time, extension)
}

/// Flatten both layers over `background` and write a PNG.
pub fn export_png(
    canvases: &Canvases<PixmapSurface>,
    background: Rgba,
    path: impl AsRef<Path>,
) -> Result<(), IoError> {
    let path = path.as_ref();
    let image = canvases.composite(background)?;
    let bytes = image.encode_png().map_err(|e| IoError::Png(e.to_string()))?;
    std::fs::write(path, bytes).map_err(|e| IoError::io(path, e))?;
    debug!("wrote {}", path.display());
    Ok(())
}

/// Write the draw commands of one frame as pretty-printed JSON.
pub fn export_commands(rendered: &RenderedFrame, path: impl AsRef<Path>) -> Result<(), IoError> {
    let path = path.as_ref();
    let json = rendered.to_json().map_err(|e| IoError::json(path, e))?;
    std::fs::write(path, json).map_err(|e| IoError::io(path, e))?;
    debug!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use edda_core::{Frame, Point, ServerPositions, Timeline};
    use edda_renderer::{
        DrawCommand, FrameRenderer, LayerName, Palette, RecordingSurface, Surface, Viewport,
    };

    #[test]
    fn test_frame_file_name() {
        assert_eq!(frame_file_name(12, "png"), "frame-00000012.png");
        assert_eq!(frame_file_name(0, "json"), "frame-00000000.json");
    }

    #[test]
    fn test_export_png_writes_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let mut canvases = Canvases::new(
            PixmapSurface::new(16, 16).unwrap(),
            PixmapSurface::new(16, 16).unwrap(),
        );
        canvases.layer_mut(LayerName::Server).draw_server(
            "a",
            Point::new(8.0, 8.0),
            Default::default(),
            &Palette::default(),
        );

        export_png(&canvases, Rgba::WHITE, &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_export_png_bad_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.png");
        let canvases = Canvases::new(
            PixmapSurface::new(4, 4).unwrap(),
            PixmapSurface::new(4, 4).unwrap(),
        );
        assert!(matches!(
            export_png(&canvases, Rgba::WHITE, &path),
            Err(IoError::Io { .. })
        ));
    }

    #[test]
    fn test_export_commands() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.json");
        let frame = Frame::new().with_sync("a", "b").with_summary("b syncs a");
        let timeline = Timeline::new().with_frame(7, frame);
        let positions = ServerPositions::new()
            .with_server("a", 0.0, 0.0)
            .with_server("b", 10.0, 0.0);
        let palette = Palette::default();
        let renderer = FrameRenderer::new(&timeline, &positions, &palette, Viewport::default());

        let mut canvases = Canvases::new(RecordingSurface::new(), RecordingSurface::new());
        renderer.render(7, &mut canvases).unwrap();
        let rendered = RenderedFrame::capture(
            7,
            timeline.frame_at(7).unwrap(),
            renderer.viewport(),
            &canvases,
        );
        export_commands(&rendered, &path).unwrap();

        let written: RenderedFrame =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.time, 7);
        assert_eq!(written.summary.as_deref(), Some("b syncs a"));
        assert_eq!(written.arrow.len(), 2);
        assert!(matches!(
            &written.arrow[1],
            DrawCommand::Arrow { from, .. } if *from == Point::new(10.0, 0.0)
        ));
        assert_eq!(written.server.len(), 3);
    }
}
