//! # Edda Core
//!
//! Data model for the cluster topology view: server positions produced by the
//! layout step, per-timestep frames describing links, broken links and syncs
//! between servers, and the timeline that indexes frames by time.
//!
//! Everything here is plain data. Drawing lives in `edda-renderer`.

pub mod error;
pub mod frame;
pub mod geometry;
pub mod server;
pub mod timeline;

pub use error::TopologyError;
pub use frame::{Frame, RelationKind, Relations};
pub use geometry::{BBox, Point};
pub use server::{ServerId, ServerPositions, ServerState};
pub use timeline::{IntegrityViolation, Timeline};
