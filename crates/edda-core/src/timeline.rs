use std::collections::BTreeMap;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::TopologyError;
use crate::frame::{Frame, RelationKind};
use crate::server::{ServerId, ServerPositions};

/// All frames of a session, indexed by time.
///
/// In JSON this is an object whose keys are the decimal time values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeline {
    frames: BTreeMap<u64, Frame>,
}

/// A relation whose endpoint has no layout position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntegrityViolation {
    pub time: u64,
    pub relation: RelationKind,
    pub server: ServerId,
    pub peer: ServerId,
    /// The endpoint (either `server` or `peer`) that is missing.
    pub missing: ServerId,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, time: u64, frame: Frame) -> Option<Frame> {
        self.frames.insert(time, frame)
    }

    pub fn with_frame(mut self, time: u64, frame: Frame) -> Self {
        self.insert(time, frame);
        self
    }

    pub fn frame_at(&self, time: u64) -> Option<&Frame> {
        self.frames.get(&time)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn first_time(&self) -> Option<u64> {
        self.frames.keys().next().copied()
    }

    pub fn last_time(&self) -> Option<u64> {
        self.frames.keys().next_back().copied()
    }

    pub fn times(&self) -> impl Iterator<Item = u64> + '_ {
        self.frames.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, &Frame)> {
        self.frames.iter().map(|(time, frame)| (*time, frame))
    }

    /// Report every relation endpoint that `positions` cannot place.
    pub fn check_integrity(&self, positions: &ServerPositions) -> Vec<IntegrityViolation> {
        let mut violations = Vec::new();
        for (time, frame) in self.iter() {
            for kind in RelationKind::ALL {
                for (server, peer) in frame.edges(kind) {
                    for endpoint in [server, peer] {
                        if positions.contains(endpoint) {
                            continue;
                        }
                        warn!(
                            "frame {}: {} {} -> {} references unplaced server {}",
                            time,
                            kind.as_str(),
                            server,
                            peer,
                            endpoint
                        );
                        violations.push(IntegrityViolation {
                            time,
                            relation: kind,
                            server: server.clone(),
                            peer: peer.clone(),
                            missing: endpoint.clone(),
                        });
                    }
                }
            }
        }
        violations
    }

    pub fn to_json(&self) -> Result<String, TopologyError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, TopologyError> {
        Ok(serde_json::from_str(json)?)
    }
}
