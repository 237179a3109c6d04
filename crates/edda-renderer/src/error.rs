use thiserror::Error;

use edda_core::ServerId;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Frame {time} references server '{server}' which has no position")]
    UnknownServer { time: u64, server: ServerId },

    #[error("Cannot allocate a {width}x{height} drawing surface")]
    SurfaceSize { width: u32, height: u32 },
}
