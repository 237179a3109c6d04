//! # Edda I/O
//!
//! Reads the inputs of the renderer (frame timeline, server positions, viewer
//! settings) from JSON files and writes rendered frames out, either as PNG
//! images or as JSON draw-command lists for a web canvas.

pub mod config;
pub mod error;
pub mod export;
pub mod loader;

pub use config::ViewerConfig;
pub use error::IoError;
pub use export::{export_commands, export_png, frame_file_name};
pub use loader::{load_positions, load_timeline};
