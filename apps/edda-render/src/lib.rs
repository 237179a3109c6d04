use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{info, warn};
use thiserror::Error;

use edda_core::{ServerPositions, Timeline};
use edda_io::{
    export_commands, export_png, frame_file_name, load_positions, load_timeline, IoError,
    ViewerConfig,
};
use edda_renderer::{
    Canvases, FrameRenderer, PixmapSurface, RecordingSurface, RenderError, RenderOutcome,
    RenderedFrame,
};

/// Render cluster topology frames to images or canvas draw commands.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render one frame, or every frame, into an output directory
    Render(RenderArgs),
    /// Report relations whose servers have no position
    Check(InputArgs),
    /// Summarize a frame timeline
    Info {
        /// Path to the frames JSON file
        #[arg(short, long)]
        frames: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Path to the frames JSON file
    #[arg(short, long)]
    pub frames: PathBuf,
    /// Path to the server positions JSON file
    #[arg(short, long)]
    pub servers: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Viewer settings JSON file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Time of the frame to render (defaults to the first frame)
    #[arg(short, long, conflicts_with = "all")]
    pub time: Option<u64>,
    /// Render every frame of the timeline
    #[arg(long)]
    pub all: bool,
    /// Output directory
    #[arg(short, long, default_value = "frames")]
    pub out: PathBuf,
    #[arg(long, value_enum, default_value_t = Format::Png)]
    pub format: Format,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Png,
    Json,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("{0} relation endpoint(s) have no server position")]
    Integrity(usize),
}

pub fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Commands::Render(args) => {
            let written = render(&args)?;
            info!("wrote {} frame(s) to {}", written.len(), args.out.display());
            Ok(())
        }
        Commands::Check(args) => check(&args),
        Commands::Info { frames } => {
            let timeline = load_timeline(&frames)?;
            print!("{}", describe(&timeline));
            Ok(())
        }
    }
}

/// Render the selected frames; returns the files written.
pub fn render(args: &RenderArgs) -> Result<Vec<PathBuf>, AppError> {
    let timeline = load_timeline(&args.input.frames)?;
    let positions = load_positions(&args.input.servers)?;
    let config = match &args.config {
        Some(path) => ViewerConfig::load(path)?,
        None => ViewerConfig::default(),
    };

    let times: Vec<u64> = if args.all {
        timeline.times().collect()
    } else {
        args.time.or(timeline.first_time()).into_iter().collect()
    };
    std::fs::create_dir_all(&args.out).map_err(|e| IoError::Io {
        path: args.out.clone(),
        source: e,
    })?;

    let renderer = FrameRenderer::new(
        &timeline,
        &positions,
        &config.palette,
        config.viewport_for(&positions),
    );
    match args.format {
        Format::Png => render_png(&renderer, &config, &times, &args.out),
        Format::Json => render_json(&renderer, &timeline, &times, &args.out),
    }
}

fn render_png(
    renderer: &FrameRenderer<'_>,
    config: &ViewerConfig,
    times: &[u64],
    out: &Path,
) -> Result<Vec<PathBuf>, AppError> {
    let mut canvases = Canvases::new(
        PixmapSurface::new(config.canvas_width, config.canvas_height)?,
        PixmapSurface::new(config.canvas_width, config.canvas_height)?,
    );
    let mut written = Vec::new();
    for &time in times {
        if renderer.render(time, &mut canvases)? == RenderOutcome::NoFrame {
            warn!("no frame at time {}, skipped", time);
            continue;
        }
        let path = out.join(frame_file_name(time, "png"));
        export_png(&canvases, config.background, &path)?;
        written.push(path);
    }
    Ok(written)
}

fn render_json(
    renderer: &FrameRenderer<'_>,
    timeline: &Timeline,
    times: &[u64],
    out: &Path,
) -> Result<Vec<PathBuf>, AppError> {
    let mut canvases = Canvases::new(RecordingSurface::new(), RecordingSurface::new());
    let mut written = Vec::new();
    for &time in times {
        let Some(frame) = timeline.frame_at(time) else {
            warn!("no frame at time {}, skipped", time);
            continue;
        };
        renderer.render(time, &mut canvases)?;
        let rendered = RenderedFrame::capture(time, frame, renderer.viewport(), &canvases);
        let path = out.join(frame_file_name(time, "json"));
        export_commands(&rendered, &path)?;
        written.push(path);
    }
    Ok(written)
}

pub fn check(args: &InputArgs) -> Result<(), AppError> {
    let timeline = load_timeline(&args.frames)?;
    let positions = load_positions(&args.servers)?;
    integrity_report(&timeline, &positions)
}

fn integrity_report(timeline: &Timeline, positions: &ServerPositions) -> Result<(), AppError> {
    let violations = timeline.check_integrity(positions);
    for v in &violations {
        println!(
            "{}\t{}\t{} -> {}\tmissing {}",
            v.time,
            v.relation.as_str(),
            v.server,
            v.peer,
            v.missing
        );
    }
    if violations.is_empty() {
        Ok(())
    } else {
        Err(AppError::Integrity(violations.len()))
    }
}

/// One line per frame: time, known states, referenced servers, relation
/// counts and summary.
pub fn describe(timeline: &Timeline) -> String {
    use edda_core::RelationKind;

    let mut out = format!(
        "{} frames, times {}..{}\n",
        timeline.len(),
        timeline.first_time().unwrap_or_default(),
        timeline.last_time().unwrap_or_default()
    );
    for (time, frame) in timeline.iter() {
        out.push_str(&format!(
            "{:>8}  states={} referenced={} links={} broken={} syncs={}  {}\n",
            time,
            frame.servers.len(),
            frame.referenced_servers().len(),
            frame.edge_count(RelationKind::Link),
            frame.edge_count(RelationKind::BrokenLink),
            frame.edge_count(RelationKind::Sync),
            frame.summary.as_deref().unwrap_or("")
        ));
    }
    out
}
