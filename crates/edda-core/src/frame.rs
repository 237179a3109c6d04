use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::server::{ServerId, ServerState};

/// Server id → ordered list of peer server ids.
pub type Relations = BTreeMap<ServerId, Vec<ServerId>>;

/// The three kinds of server-to-server relation a frame can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    Link,
    BrokenLink,
    Sync,
}

impl RelationKind {
    /// Draw order: links first, syncs on top.
    pub const ALL: [RelationKind; 3] = [
        RelationKind::Link,
        RelationKind::BrokenLink,
        RelationKind::Sync,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::Link => "links",
            RelationKind::BrokenLink => "broken_links",
            RelationKind::Sync => "syncs",
        }
    }
}

/// Snapshot of the cluster's relational state at one timestamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    #[serde(default)]
    pub links: Relations,
    #[serde(default)]
    pub broken_links: Relations,
    /// For `syncs[a] = [b, ..]`, `a` syncs from `b`: data flows `b → a`.
    #[serde(default)]
    pub syncs: Relations,
    /// Replica-set state per server at this instant.
    #[serde(default)]
    pub servers: BTreeMap<ServerId, ServerState>,
    /// Human-readable description of what changed in this frame.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_link(mut self, server: &str, peer: &str) -> Self {
        push_relation(&mut self.links, server, peer);
        self
    }

    pub fn with_broken_link(mut self, server: &str, peer: &str) -> Self {
        push_relation(&mut self.broken_links, server, peer);
        self
    }

    /// Record that `server` syncs from `source`.
    pub fn with_sync(mut self, server: &str, source: &str) -> Self {
        push_relation(&mut self.syncs, server, source);
        self
    }

    pub fn with_state(mut self, server: &str, state: ServerState) -> Self {
        self.servers.insert(server.to_string(), state);
        self
    }

    pub fn with_summary(mut self, summary: &str) -> Self {
        self.summary = Some(summary.to_string());
        self
    }

    pub fn relation(&self, kind: RelationKind) -> &Relations {
        match kind {
            RelationKind::Link => &self.links,
            RelationKind::BrokenLink => &self.broken_links,
            RelationKind::Sync => &self.syncs,
        }
    }

    /// Every `(server, peer)` pair of one relation, in map then list order.
    pub fn edges(&self, kind: RelationKind) -> impl Iterator<Item = (&ServerId, &ServerId)> {
        self.relation(kind)
            .iter()
            .flat_map(|(server, peers)| peers.iter().map(move |peer| (server, peer)))
    }

    pub fn edge_count(&self, kind: RelationKind) -> usize {
        self.relation(kind).values().map(Vec::len).sum()
    }

    /// State of a server in this frame, `Unknown` when the frame is silent about it.
    pub fn state_of(&self, server: &str) -> ServerState {
        self.servers.get(server).copied().unwrap_or_default()
    }

    /// All server ids mentioned by any relation, as keys or peers.
    pub fn referenced_servers(&self) -> BTreeSet<&ServerId> {
        RelationKind::ALL
            .iter()
            .flat_map(|&kind| self.edges(kind))
            .flat_map(|(server, peer)| [server, peer])
            .collect()
    }
}

fn push_relation(relations: &mut Relations, server: &str, peer: &str) {
    relations
        .entry(server.to_string())
        .or_default()
        .push(peer.to_string());
}
