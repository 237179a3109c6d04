use thiserror::Error;

use crate::server::ServerId;

#[derive(Error, Debug)]
pub enum TopologyError {
    #[error("Server '{0}' has no position")]
    UnknownServer(ServerId),

    #[error("Invalid topology JSON: {0}")]
    Json(#[from] serde_json::Error),
}
