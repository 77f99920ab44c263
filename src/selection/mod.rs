//! # Selection State Machine
//!
//! Tracks which node is selected and whether its detail popup is open, and
//! derives the edge set the map surface should draw.
//!
//! The state is a tagged selection (`None` = idle) plus an *orthogonal*
//! popup flag — keeping them separate is what makes the background-click
//! priority rule (close popup first, clear selection second) trivial to
//! express. Edge computation is a pure function of `(selection, nodes)` and
//! is re-derived from scratch on every interaction tick.

use serde::Serialize;

use crate::model::{Edge, EdgeKind, Node, Tier, UserId};

// ============================================================================
// State
// ============================================================================

/// Session-scoped interaction state. Never serialized for persistence; the
/// `Serialize` impl exists only for the render-surface export.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectionState {
    selected: Option<UserId>,
    popup_open: bool,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&UserId> {
        self.selected.as_ref()
    }

    pub fn popup_open(&self) -> bool {
        self.popup_open
    }

    pub fn is_idle(&self) -> bool {
        self.selected.is_none()
    }

    /// A node was clicked.
    ///
    /// - Unknown id (a refresh may have raced the click): no-op.
    /// - Already-selected id: open the detail popup, keep the selection.
    /// - Any other id: switch the selection directly without passing through
    ///   idle; switching never opens a popup as a side effect.
    pub fn node_click(&mut self, id: &UserId, nodes: &[Node]) {
        if !nodes.iter().any(|n| &n.id == id) {
            return;
        }
        if self.selected.as_ref() == Some(id) {
            self.popup_open = true;
        } else {
            self.selected = Some(id.clone());
            self.popup_open = false;
        }
    }

    /// Empty canvas was clicked. Priority: a visible popup absorbs the
    /// click; only a further background click clears the selection.
    pub fn background_click(&mut self) {
        if self.popup_open {
            self.popup_open = false;
        } else {
            self.selected = None;
        }
    }

    /// The popup was opened directly by the render surface (e.g. a marker
    /// popup). Meaningless without a selection.
    pub fn popup_opened(&mut self) {
        if self.selected.is_some() {
            self.popup_open = true;
        }
    }

    /// The popup was closed by any means — explicit close button or
    /// navigation. Selection is untouched.
    pub fn popup_closed(&mut self) {
        self.popup_open = false;
    }

    /// Drop state entirely (used when a refresh removes the selected node).
    pub fn reset(&mut self) {
        self.selected = None;
        self.popup_open = false;
    }
}

// ============================================================================
// Edge computation
// ============================================================================

/// Derive the edges to draw for the current selection.
///
/// - Self selected: one edge to every direct contact.
/// - Direct contact selected: its edge from self, plus one edge to every
///   indirect node it introduced.
/// - Indirect node selected: every provenance path drawn in full — for each
///   introducer, the introducer→node edge and the self→introducer edge.
/// - Idle: no edges.
pub fn compute_edges(selection: &SelectionState, nodes: &[Node]) -> Vec<Edge> {
    let Some(selected_id) = selection.selected() else {
        return Vec::new();
    };
    let Some(selected) = nodes.iter().find(|n| &n.id == selected_id) else {
        return Vec::new();
    };
    let Some(origin) = nodes.iter().find(|n| n.tier == Tier::Self_) else {
        return Vec::new();
    };

    let mut edges = Vec::new();
    match selected.tier {
        Tier::Self_ => {
            for node in nodes.iter().filter(|n| n.tier == Tier::Direct) {
                edges.push(Edge::new(
                    origin.id.clone(),
                    node.id.clone(),
                    EdgeKind::SelfDirect,
                ));
            }
        }
        Tier::Direct => {
            edges.push(Edge::new(
                origin.id.clone(),
                selected.id.clone(),
                EdgeKind::SelfDirect,
            ));
            for node in nodes.iter().filter(|n| n.tier == Tier::Indirect) {
                if node.has_introducer(&selected.id) {
                    edges.push(Edge::new(
                        selected.id.clone(),
                        node.id.clone(),
                        EdgeKind::DirectIndirect,
                    ));
                }
            }
        }
        Tier::Indirect => {
            for introducer in &selected.introduced_by {
                edges.push(Edge::new(
                    introducer.clone(),
                    selected.id.clone(),
                    EdgeKind::DirectIndirect,
                ));
                edges.push(Edge::new(
                    origin.id.clone(),
                    introducer.clone(),
                    EdgeKind::SelfDirect,
                ));
            }
        }
    }
    edges
}
