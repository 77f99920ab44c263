//! Visual connection between two nodes.
//!
//! Edges are derived on demand from the current selection — they are never
//! stored or persisted.

use serde::{Deserialize, Serialize};

use super::UserId;

/// Which relationship tier boundary an edge crosses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Self node to one of its direct contacts.
    #[serde(rename = "self-direct")]
    SelfDirect,
    /// Direct contact to one of the indirect nodes it introduced.
    #[serde(rename = "direct-indirect")]
    DirectIndirect,
}

/// A directed visual connection handed to the render surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub from: UserId,
    pub to: UserId,
    pub kind: EdgeKind,
}

impl Edge {
    pub fn new(from: UserId, to: UserId, kind: EdgeKind) -> Self {
        Self { from, to, kind }
    }
}
