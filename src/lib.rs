//! # proximity-graph — Social Proximity Graph Engine
//!
//! Consolidates a user's direct contacts and their contacts' contacts into a
//! deduplicated, multi-parent-aware graph, assigns every node a stable
//! pseudo-random radial position backed by a client-local cache, and drives
//! the selection state machine that decides which edges the map surface
//! draws.
//!
//! ## Design Principles
//!
//! 1. **Pure pipeline**: build → assign → select; each stage is a pure
//!    transform over its explicit input plus the position store
//! 2. **Clean DTOs**: `Node`, `Edge`, `UserInfo` cross all boundaries;
//!    display payloads pass through uninterpreted
//! 3. **Randomness only matters once**: layout is generate-then-cache,
//!    never seeded — stability comes entirely from the `PositionStore`
//! 4. **Edges are derived, never stored**: re-computed from the selection
//!    on every interaction tick
//!
//! ## Quick Start
//!
//! ```rust
//! use proximity_graph::{Engine, SecondDegree, UserInfo};
//!
//! # fn main() -> proximity_graph::Result<()> {
//! let mut engine = Engine::in_memory()?;
//!
//! let me = UserInfo::new("me");
//! let friends = vec![UserInfo::new("ada"), UserInfo::new("bob")];
//! let mut second = SecondDegree::new();
//! second.insert("ada".into(), vec![UserInfo::new("eve")]);
//!
//! let nodes = engine.refresh(&me, &friends, &second)?;
//! assert_eq!(nodes.len(), 4);
//!
//! // Clicking a direct contact lights up its edges.
//! let edges = engine.node_click(&"ada".into());
//! assert_eq!(edges.len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! ## Position Stores
//!
//! | Store | Description |
//! |-------|-------------|
//! | `MemoryStore` | In-process only — tests and server-side ports |
//! | `JsonFileStore` | Durable single-file JSON blob, self-healing on corruption |

// ============================================================================
// Modules
// ============================================================================

pub mod graph;
pub mod layout;
pub mod model;
pub mod selection;
pub mod store;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    Coordinate, Edge, EdgeKind, Node, Profile, SecondDegree, Tier, UserId, UserInfo,
};

// ============================================================================
// Re-exports: Layout
// ============================================================================

pub use layout::{Annulus, LayoutConfig};

// ============================================================================
// Re-exports: Store & Selection
// ============================================================================

pub use selection::SelectionState;
pub use store::{JsonFileStore, MemoryStore, PositionStore};

use serde::Serialize;
use tracing::debug;

// ============================================================================
// Top-level Engine handle
// ============================================================================

/// The primary entry point. An `Engine` owns a position store, a layout
/// configuration, the latest node set, and the selection state, and exposes
/// the event surface the render layer feeds.
pub struct Engine<S: PositionStore> {
    store: S,
    config: LayoutConfig,
    nodes: Vec<Node>,
    selection: SelectionState,
}

impl<S: PositionStore> Engine<S> {
    /// Create an engine over `store` with the default canvas geometry.
    pub fn with_store(store: S) -> Result<Self> {
        Self::with_config(store, LayoutConfig::default())
    }

    /// Create an engine with explicit geometry. Invalid annulus bounds are a
    /// contract violation and are rejected here, never clamped.
    pub fn with_config(store: S, config: LayoutConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store,
            config,
            nodes: Vec::new(),
            selection: SelectionState::new(),
        })
    }

    /// Rebuild the graph from fresh collaborator data and lay it out.
    ///
    /// The previous node set is replaced atomically from the caller's
    /// perspective: accessors only ever observe the latest completed result.
    /// A selection whose node vanished in the refresh is cleared.
    pub fn refresh(
        &mut self,
        self_user: &UserInfo,
        direct: &[UserInfo],
        second_degree: &SecondDegree,
    ) -> Result<&[Node]> {
        // Phase 1: Build the deduplicated tiered node set.
        let mut nodes = graph::build(self_user, direct, second_degree);

        // Phase 2: Assign stable positions via the store.
        layout::assign(&mut nodes, &self.store, &self.config)?;

        self.nodes = nodes;

        // UI clicks can race a refresh; a dangling selection is dropped.
        let dangling = self
            .selection
            .selected()
            .is_some_and(|id| !self.nodes.iter().any(|n| &n.id == id));
        if dangling {
            debug!("selected node vanished in refresh, clearing selection");
            self.selection.reset();
        }

        Ok(&self.nodes)
    }

    /// The latest built node set, positions populated.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Edges for the current selection, re-derived from scratch.
    pub fn edges(&self) -> Vec<Edge> {
        selection::compute_edges(&self.selection, &self.nodes)
    }

    /// A node was clicked. Returns the edge set to draw.
    pub fn node_click(&mut self, id: &UserId) -> Vec<Edge> {
        self.selection.node_click(id, &self.nodes);
        self.edges()
    }

    /// Empty canvas was clicked. Returns the edge set to draw.
    pub fn background_click(&mut self) -> Vec<Edge> {
        self.selection.background_click();
        self.edges()
    }

    /// The detail popup was opened directly by the render surface.
    pub fn popup_opened(&mut self) {
        self.selection.popup_opened();
    }

    /// The detail popup was closed by any means.
    pub fn popup_closed(&mut self) {
        self.selection.popup_closed();
    }

    /// Access the underlying position store (for advanced use).
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Serialize the current render state (nodes, selection, edges) as JSON
    /// for the map surface.
    pub fn export_json(&self) -> Result<String> {
        #[derive(Serialize)]
        struct RenderState<'a> {
            nodes: &'a [Node],
            selection: &'a SelectionState,
            edges: Vec<Edge>,
        }
        let state = RenderState {
            nodes: &self.nodes,
            selection: &self.selection,
            edges: self.edges(),
        };
        Ok(serde_json::to_string(&state)?)
    }
}

/// In-memory engine for testing and server-side embedding.
impl Engine<MemoryStore> {
    pub fn in_memory() -> Result<Self> {
        Self::with_store(MemoryStore::new())
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid annulus bounds: {0}")]
    InvalidAnnulus(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
