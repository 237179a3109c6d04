use log::debug;
use serde::Serialize;

use edda_core::{Frame, Point, RelationKind, ServerPositions, Timeline};

use crate::error::RenderError;
use crate::style::Palette;
use crate::surface::{Canvases, LayerName, Surface};
use crate::viewport::Viewport;

/// What a call to [`render_frame`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RenderOutcome {
    /// No frame exists at the requested time; nothing was touched.
    NoFrame,
    Rendered(RenderStats),
}

/// Number of primitives issued per pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenderStats {
    pub links: usize,
    pub broken_links: usize,
    pub syncs: usize,
    pub servers: usize,
}

/// A screen-space segment ready to draw.
#[derive(Debug, Clone, Copy)]
struct Edge {
    from: Point,
    to: Point,
}

/// Every edge of a frame with both endpoints resolved.
struct FramePlan {
    links: Vec<Edge>,
    broken_links: Vec<Edge>,
    syncs: Vec<Edge>,
}

impl FramePlan {
    fn resolve(
        time: u64,
        frame: &Frame,
        positions: &ServerPositions,
        viewport: &Viewport,
    ) -> Result<Self, RenderError> {
        let locate = |id: &str| -> Result<Point, RenderError> {
            let at = positions
                .resolve(id)
                .map_err(|_| RenderError::UnknownServer {
                    time,
                    server: id.to_string(),
                })?;
            Ok(viewport.to_screen(at))
        };
        let edges = |kind: RelationKind| -> Result<Vec<Edge>, RenderError> {
            frame
                .edges(kind)
                .map(|(server, peer)| -> Result<Edge, RenderError> {
                    let (server, peer) = (locate(server.as_str())?, locate(peer.as_str())?);
                    // A sync is stored on its destination; draw it from the source.
                    Ok(match kind {
                        RelationKind::Sync => Edge { from: peer, to: server },
                        _ => Edge { from: server, to: peer },
                    })
                })
                .collect()
        };
        Ok(Self {
            links: edges(RelationKind::Link)?,
            broken_links: edges(RelationKind::BrokenLink)?,
            syncs: edges(RelationKind::Sync)?,
        })
    }
}

/// Draw the cluster as it was at `time`.
///
/// A missing frame is a no-op. Otherwise both layers are cleared and redrawn
/// in order: links, broken links and syncs on the arrow layer, then server
/// markers on the server layer. All endpoints are resolved before anything is
/// cleared, so an unplaced server leaves the canvases as they were.
pub fn render_frame<S: Surface>(
    time: u64,
    timeline: &Timeline,
    positions: &ServerPositions,
    viewport: &Viewport,
    palette: &Palette,
    canvases: &mut Canvases<S>,
) -> Result<RenderOutcome, RenderError> {
    let Some(frame) = timeline.frame_at(time) else {
        debug!("no frame at time {}", time);
        return Ok(RenderOutcome::NoFrame);
    };
    let plan = FramePlan::resolve(time, frame, positions, viewport)?;

    canvases.clear_layer(LayerName::Arrow);
    canvases.clear_layer(LayerName::Server);

    let arrow = canvases.layer_mut(LayerName::Arrow);
    let stats = RenderStats {
        links: render_links(&plan.links, palette, arrow),
        broken_links: render_broken_links(&plan.broken_links, palette, arrow),
        syncs: render_syncs(&plan.syncs, palette, arrow),
        servers: draw_servers(
            frame,
            positions,
            viewport,
            palette,
            canvases.layer_mut(LayerName::Server),
        ),
    };
    debug!(
        "frame {}: {} links, {} broken, {} syncs, {} servers",
        time, stats.links, stats.broken_links, stats.syncs, stats.servers
    );
    Ok(RenderOutcome::Rendered(stats))
}

fn render_links<S: Surface>(edges: &[Edge], palette: &Palette, surface: &mut S) -> usize {
    for edge in edges {
        surface.draw_line(edge.from, edge.to, &palette.link);
    }
    edges.len()
}

fn render_broken_links<S: Surface>(edges: &[Edge], palette: &Palette, surface: &mut S) -> usize {
    for edge in edges {
        surface.draw_broken_link(edge.from, edge.to, &palette.broken_link);
    }
    edges.len()
}

fn render_syncs<S: Surface>(edges: &[Edge], palette: &Palette, surface: &mut S) -> usize {
    for edge in edges {
        surface.draw_arrow(edge.from, edge.to, &palette.sync, palette.arrow_head);
    }
    edges.len()
}

/// One marker per placed server, coloured by its state in `frame`.
fn draw_servers<S: Surface>(
    frame: &Frame,
    positions: &ServerPositions,
    viewport: &Viewport,
    palette: &Palette,
    surface: &mut S,
) -> usize {
    for id in frame.servers.keys().filter(|id| !positions.contains(id)) {
        debug!("state for unplaced server {} ignored", id);
    }
    for (id, position) in positions.iter() {
        surface.draw_server(id, viewport.to_screen(*position), frame.state_of(id), palette);
    }
    positions.len()
}

/// The immutable inputs of [`render_frame`], bundled for repeated calls
/// from a timer or slider.
#[derive(Debug, Clone, Copy)]
pub struct FrameRenderer<'a> {
    timeline: &'a Timeline,
    positions: &'a ServerPositions,
    palette: &'a Palette,
    viewport: Viewport,
}

impl<'a> FrameRenderer<'a> {
    pub fn new(
        timeline: &'a Timeline,
        positions: &'a ServerPositions,
        palette: &'a Palette,
        viewport: Viewport,
    ) -> Self {
        Self {
            timeline,
            positions,
            palette,
            viewport,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn render<S: Surface>(
        &self,
        time: u64,
        canvases: &mut Canvases<S>,
    ) -> Result<RenderOutcome, RenderError> {
        render_frame(
            time,
            self.timeline,
            self.positions,
            &self.viewport,
            self.palette,
            canvases,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render_data::{DrawCommand, RecordingSurface};
    use edda_core::ServerState;

    fn canvases() -> Canvases<RecordingSurface> {
        Canvases::new(RecordingSurface::new(), RecordingSurface::new())
    }

    fn positions() -> ServerPositions {
        ServerPositions::new()
            .with_server("A", 0.0, 0.0)
            .with_server("B", 1.0, 1.0)
            .with_server("C", 5.0, 2.0)
    }

    fn render(
        time: u64,
        timeline: &Timeline,
        canvases: &mut Canvases<RecordingSurface>,
    ) -> Result<RenderOutcome, RenderError> {
        let palette = Palette::default();
        let positions = positions();
        FrameRenderer::new(timeline, &positions, &palette, Viewport::default())
            .render(time, canvases)
    }

    fn arrow_ops(canvases: &Canvases<RecordingSurface>) -> &[DrawCommand] {
        canvases.layer(LayerName::Arrow).commands()
    }

    #[test]
    fn test_missing_frame_is_noop() {
        let timeline = Timeline::new().with_frame(1, Frame::new().with_link("A", "B"));
        let mut canvases = canvases();
        let outcome = render(2, &timeline, &mut canvases).unwrap();
        assert_eq!(outcome, RenderOutcome::NoFrame);
        assert!(arrow_ops(&canvases).is_empty());
        assert!(canvases.layer(LayerName::Server).commands().is_empty());
    }

    #[test]
    fn test_empty_frame_only_clears_and_draws_servers() {
        let timeline = Timeline::new().with_frame(0, Frame::new());
        let mut canvases = canvases();
        render(0, &timeline, &mut canvases).unwrap();

        assert_eq!(arrow_ops(&canvases), &[DrawCommand::Clear]);
        let server_ops = canvases.layer(LayerName::Server).commands();
        assert_eq!(server_ops[0], DrawCommand::Clear);
        assert_eq!(server_ops.len(), 4);
        assert!(server_ops[1..]
            .iter()
            .all(|op| matches!(op, DrawCommand::Server { .. })));
    }

    #[test]
    fn test_single_link() {
        let timeline = Timeline::new().with_frame(0, Frame::new().with_link("A", "B"));
        let mut canvases = canvases();
        let outcome = render(0, &timeline, &mut canvases).unwrap();

        let lines: Vec<_> = arrow_ops(&canvases)
            .iter()
            .filter_map(|op| match op {
                DrawCommand::Line { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect();
        assert_eq!(lines, vec![(Point::new(0.0, 0.0), Point::new(1.0, 1.0))]);
        match outcome {
            RenderOutcome::Rendered(stats) => {
                assert_eq!(stats.links, 1);
                assert_eq!(stats.syncs, 0);
                assert_eq!(stats.servers, 3);
            }
            RenderOutcome::NoFrame => panic!("frame 0 exists"),
        }
    }

    #[test]
    fn test_sync_arrow_points_from_source() {
        let timeline = Timeline::new().with_frame(0, Frame::new().with_sync("A", "B"));
        let mut canvases = canvases();
        render(0, &timeline, &mut canvases).unwrap();

        match &arrow_ops(&canvases)[1] {
            DrawCommand::Arrow { from, to, head, .. } => {
                assert_eq!(*from, Point::new(1.0, 1.0));
                assert_eq!(*to, Point::new(0.0, 0.0));
                assert_eq!(*head, Palette::default().arrow_head);
            }
            other => panic!("expected arrow, got {:?}", other),
        }
    }

    #[test]
    fn test_pass_order_and_styles() {
        let frame = Frame::new()
            .with_sync("C", "A")
            .with_broken_link("B", "C")
            .with_link("A", "C");
        let timeline = Timeline::new().with_frame(0, frame);
        let mut canvases = canvases();
        render(0, &timeline, &mut canvases).unwrap();

        let palette = Palette::default();
        let ops = arrow_ops(&canvases);
        assert_eq!(ops.len(), 4);
        assert!(matches!(&ops[1], DrawCommand::Line { style, .. } if *style == palette.link));
        assert!(matches!(
            &ops[2],
            DrawCommand::BrokenLink { style, .. } if *style == palette.broken_link
        ));
        assert!(matches!(&ops[3], DrawCommand::Arrow { .. }));
    }

    #[test]
    fn test_server_state_from_frame() {
        let frame = Frame::new()
            .with_state("A", ServerState::Primary)
            .with_state("Z", ServerState::Down);
        let timeline = Timeline::new().with_frame(0, frame);
        let mut canvases = canvases();
        render(0, &timeline, &mut canvases).unwrap();

        let states: Vec<(&str, ServerState)> = canvases
            .layer(LayerName::Server)
            .commands()
            .iter()
            .filter_map(|op| match op {
                DrawCommand::Server { id, state, .. } => Some((id.as_str(), *state)),
                _ => None,
            })
            .collect();
        assert_eq!(
            states,
            vec![
                ("A", ServerState::Primary),
                ("B", ServerState::Unknown),
                ("C", ServerState::Unknown),
            ]
        );
    }

    #[test]
    fn test_second_render_replaces_first() {
        let timeline = Timeline::new()
            .with_frame(0, Frame::new().with_link("A", "B").with_link("B", "C"))
            .with_frame(1, Frame::new().with_broken_link("A", "C"));
        let mut canvases = canvases();
        render(0, &timeline, &mut canvases).unwrap();
        render(1, &timeline, &mut canvases).unwrap();

        let ops = arrow_ops(&canvases);
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0], DrawCommand::Clear);
        assert!(matches!(&ops[1], DrawCommand::BrokenLink { .. }));
        assert_eq!(canvases.layer(LayerName::Server).commands().len(), 4);
    }

    #[test]
    fn test_unknown_server_leaves_canvases_untouched() {
        let timeline = Timeline::new()
            .with_frame(0, Frame::new().with_link("A", "B"))
            .with_frame(1, Frame::new().with_link("A", "B").with_sync("B", "ghost"));
        let mut canvases = canvases();
        render(0, &timeline, &mut canvases).unwrap();
        let before = canvases.clone();

        match render(1, &timeline, &mut canvases) {
            Err(RenderError::UnknownServer { time, server }) => {
                assert_eq!(time, 1);
                assert_eq!(server, "ghost");
            }
            other => panic!("expected UnknownServer, got {:?}", other),
        }
        assert_eq!(arrow_ops(&canvases), arrow_ops(&before));
        assert_eq!(
            canvases.layer(LayerName::Server).commands(),
            before.layer(LayerName::Server).commands()
        );
    }

    #[test]
    fn test_viewport_applied_to_edges() {
        let timeline = Timeline::new().with_frame(0, Frame::new().with_link("A", "B"));
        let positions = positions();
        let palette = Palette::default();
        let mut viewport = Viewport::new(100.0, 100.0);
        viewport.zoom = 10.0;
        let mut canvases = canvases();
        render_frame(0, &timeline, &positions, &viewport, &palette, &mut canvases).unwrap();

        match &arrow_ops(&canvases)[1] {
            DrawCommand::Line { from, to, .. } => {
                assert_eq!(*from, Point::new(50.0, 50.0));
                assert_eq!(*to, Point::new(60.0, 60.0));
            }
            other => panic!("expected line, got {:?}", other),
        }
    }
}
