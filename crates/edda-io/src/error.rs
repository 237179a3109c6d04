use std::io;
use std::path::PathBuf;

use thiserror::Error;

use edda_renderer::RenderError;

#[derive(Error, Debug)]
pub enum IoError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("PNG encoding failed: {0}")]
    Png(String),
}

impl IoError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        IoError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        IoError::Json {
            path: path.into(),
            source,
        }
    }
}
