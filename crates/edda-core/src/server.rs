use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TopologyError;
use crate::geometry::{BBox, Point};

/// Server identifier, typically `host:port`.
pub type ServerId = String;

/// Replica-set state of a server at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ServerState {
    Primary,
    Secondary,
    Arbiter,
    Recovering,
    Startup,
    Down,
    #[default]
    Unknown,
}

impl ServerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServerState::Primary => "PRIMARY",
            ServerState::Secondary => "SECONDARY",
            ServerState::Arbiter => "ARBITER",
            ServerState::Recovering => "RECOVERING",
            ServerState::Startup => "STARTUP",
            ServerState::Down => "DOWN",
            ServerState::Unknown => "UNKNOWN",
        }
    }
}

impl From<String> for ServerState {
    fn from(s: String) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "PRIMARY" => ServerState::Primary,
            "SECONDARY" => ServerState::Secondary,
            "ARBITER" => ServerState::Arbiter,
            "RECOVERING" | "ROLLBACK" => ServerState::Recovering,
            "STARTUP" | "STARTUP2" => ServerState::Startup,
            "DOWN" | "FATAL" | "REMOVED" => ServerState::Down,
            _ => ServerState::Unknown,
        }
    }
}

impl From<ServerState> for String {
    fn from(state: ServerState) -> Self {
        state.as_str().to_string()
    }
}

impl fmt::Display for ServerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Layout coordinates for every server, as computed by the layout step.
///
/// Read-only from the renderer's point of view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServerPositions {
    positions: BTreeMap<ServerId, Point>,
}

impl ServerPositions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<ServerId>, position: Point) {
        self.positions.insert(id.into(), position);
    }

    pub fn with_server(mut self, id: impl Into<ServerId>, x: f64, y: f64) -> Self {
        self.insert(id, Point::new(x, y));
        self
    }

    pub fn get(&self, id: &str) -> Option<Point> {
        self.positions.get(id).copied()
    }

    /// Look up a position, failing if the server was never laid out.
    pub fn resolve(&self, id: &str) -> Result<Point, TopologyError> {
        self.get(id)
            .ok_or_else(|| TopologyError::UnknownServer(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Servers in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&ServerId, &Point)> {
        self.positions.iter()
    }

    /// Bounding box of all positions, `None` when there are no servers.
    pub fn bbox(&self) -> Option<BBox> {
        BBox::from_points(self.positions.values())
    }

    pub fn from_json(json: &str) -> Result<Self, TopologyError> {
        Ok(serde_json::from_str(json)?)
    }
}
