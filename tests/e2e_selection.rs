//! End-to-end tests for the selection state machine and edge computation.
//!
//! Each test drives the `Engine` event surface the way a render layer would:
//! refresh with collaborator data, then feed clicks and popup events and
//! check the derived edge set.

use pretty_assertions::assert_eq;
use proximity_graph::{
    Edge, EdgeKind, Engine, MemoryStore, SecondDegree, SelectionState, UserInfo, selection,
};
use std::collections::HashSet;

fn user(id: &str) -> UserInfo {
    UserInfo::new(id)
}

/// self `me`; direct contacts `a`, `b`; x known via both, y via a only.
fn engine() -> Engine<MemoryStore> {
    let mut engine = Engine::in_memory().unwrap();
    let mut second = SecondDegree::new();
    second.insert("a".into(), vec![user("x"), user("y")]);
    second.insert("b".into(), vec![user("x")]);
    engine
        .refresh(&user("me"), &[user("a"), user("b")], &second)
        .unwrap();
    engine
}

fn edge_set(edges: &[Edge]) -> HashSet<Edge> {
    edges.iter().cloned().collect()
}

fn self_direct(from: &str, to: &str) -> Edge {
    Edge::new(from.into(), to.into(), EdgeKind::SelfDirect)
}

fn direct_indirect(from: &str, to: &str) -> Edge {
    Edge::new(from.into(), to.into(), EdgeKind::DirectIndirect)
}

// ============================================================================
// 1. Idle emits no edges
// ============================================================================

#[test]
fn test_idle_no_edges() {
    let engine = engine();
    assert!(engine.selection().is_idle());
    assert!(engine.edges().is_empty());
}

// ============================================================================
// 2. Selecting self connects every direct contact
// ============================================================================

#[test]
fn test_select_self() {
    let mut engine = engine();
    let edges = engine.node_click(&"me".into());
    assert_eq!(
        edge_set(&edges),
        HashSet::from([self_direct("me", "a"), self_direct("me", "b")])
    );
}

// ============================================================================
// 3. Selecting a direct contact: spine edge plus its indirect fan-out
// ============================================================================

#[test]
fn test_select_direct() {
    let mut engine = engine();
    let edges = engine.node_click(&"a".into());
    assert_eq!(
        edge_set(&edges),
        HashSet::from([
            self_direct("me", "a"),
            direct_indirect("a", "x"),
            direct_indirect("a", "y"),
        ])
    );
}

// ============================================================================
// 4. Selecting a multi-parent indirect node draws every provenance path
// ============================================================================

#[test]
fn test_select_indirect_multi_parent() {
    let mut engine = engine();
    let edges = engine.node_click(&"x".into());
    assert_eq!(edges.len(), 4, "both provenance paths, two edges each");
    assert_eq!(
        edge_set(&edges),
        HashSet::from([
            direct_indirect("a", "x"),
            self_direct("me", "a"),
            direct_indirect("b", "x"),
            self_direct("me", "b"),
        ])
    );
}

// ============================================================================
// 5. Full transition walk from the interaction contract
// ============================================================================

#[test]
fn test_transition_walk() {
    let mut engine = engine();

    // Idle --select(a)--> NodeSelected(a)
    engine.node_click(&"a".into());
    assert_eq!(engine.selection().selected(), Some(&"a".into()));
    assert!(!engine.selection().popup_open());

    // Re-selecting the same node opens its popup, selection unchanged.
    engine.node_click(&"a".into());
    assert_eq!(engine.selection().selected(), Some(&"a".into()));
    assert!(engine.selection().popup_open());

    // Background click with a popup open: popup closes, selection survives.
    let edges = engine.background_click();
    assert_eq!(engine.selection().selected(), Some(&"a".into()));
    assert!(!engine.selection().popup_open());
    assert!(!edges.is_empty(), "selection still drawn while popup closes");

    // Second background click: back to idle, no edges.
    let edges = engine.background_click();
    assert!(engine.selection().is_idle());
    assert!(edges.is_empty());
}

// ============================================================================
// 6. Switching selection never passes through idle or opens a popup
// ============================================================================

#[test]
fn test_switch_selection_directly() {
    let mut engine = engine();
    engine.node_click(&"a".into());
    let edges = engine.node_click(&"b".into());

    assert_eq!(engine.selection().selected(), Some(&"b".into()));
    assert!(!engine.selection().popup_open());
    assert_eq!(
        edge_set(&edges),
        HashSet::from([self_direct("me", "b"), direct_indirect("b", "x")])
    );
}

// ============================================================================
// 7. Popup close by any means leaves the selection alone
// ============================================================================

#[test]
fn test_popup_close_keeps_selection() {
    let mut engine = engine();
    engine.node_click(&"a".into());
    engine.node_click(&"a".into());
    assert!(engine.selection().popup_open());

    engine.popup_closed();
    assert!(!engine.selection().popup_open());
    assert_eq!(engine.selection().selected(), Some(&"a".into()));
}

// ============================================================================
// 8. Clicking an id absent from the node set is a no-op
// ============================================================================

#[test]
fn test_unknown_id_no_op() {
    let mut engine = engine();
    engine.node_click(&"a".into());

    let edges = engine.node_click(&"ghost".into());
    assert_eq!(engine.selection().selected(), Some(&"a".into()));
    assert_eq!(edge_set(&edges), edge_set(&engine.edges()));
}

// ============================================================================
// 9. A refresh that removes the selected node clears the selection
// ============================================================================

#[test]
fn test_refresh_clears_dangling_selection() {
    let mut engine = engine();
    engine.node_click(&"b".into());
    engine.node_click(&"b".into());
    assert!(engine.selection().popup_open());

    // b was unfriended; the new data no longer contains it.
    engine
        .refresh(&user("me"), &[user("a")], &SecondDegree::new())
        .unwrap();

    assert!(engine.selection().is_idle());
    assert!(!engine.selection().popup_open());
    assert!(engine.edges().is_empty());
}

// ============================================================================
// 10. Edge computation is pure: same inputs, same output
// ============================================================================

#[test]
fn test_compute_edges_is_pure() {
    let engine = {
        let mut e = engine();
        e.node_click(&"x".into());
        e
    };
    let state: &SelectionState = engine.selection();

    let first = selection::compute_edges(state, engine.nodes());
    let second = selection::compute_edges(state, engine.nodes());
    assert_eq!(first, second);
    assert_eq!(first, engine.edges());
}

// ============================================================================
// 11. Export carries nodes, selection, and edges for the render surface
// ============================================================================

#[test]
fn test_export_json_shape() {
    let mut engine = engine();
    engine.node_click(&"a".into());

    let blob = engine.export_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&blob).unwrap();

    assert_eq!(value["nodes"].as_array().unwrap().len(), 5);
    assert_eq!(value["selection"]["selected"], "a");
    assert_eq!(value["selection"]["popup_open"], false);
    assert_eq!(value["edges"][0]["kind"], "self-direct");

    let a = value["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|n| n["id"] == "a")
        .unwrap();
    assert_eq!(a["tier"], "direct");
    assert!(a["position"]["x"].is_f64());
}
