//! Integration tests for the graph store
//!
//! These tests exercise id allocation, cascading removal and the edge
//! acceptance rules through the public API only.

mod common;

use common::builders::GraphBuilder;
use flow_canvas::geometry::Point;
use flow_canvas::graph::{GraphError, GraphStore, HandleSide, NodeKind, NodePatch};
use proptest::prelude::*;

#[test]
fn test_first_ids_are_n1_n2_e1() {
    let mut store = GraphStore::new();
    let a = store.add_node(NodeKind::Trigger, "Start", "", Point::new(0.0, 0.0));
    let b = store.add_node(NodeKind::Action, "Email", "", Point::new(300.0, 0.0));
    let e = store
        .add_edge(a, b, HandleSide::Right, HandleSide::Left)
        .unwrap();

    assert_eq!(a.to_string(), "n1");
    assert_eq!(b.to_string(), "n2");
    assert_eq!(e.to_string(), "e1");
}

#[test]
fn test_removing_hub_cascades_edges() {
    let mut store = GraphBuilder::new()
        .node("Start", NodeKind::Trigger, 0.0, 0.0)
        .node("Check", NodeKind::Condition, 300.0, 0.0)
        .node("Yes", NodeKind::Action, 600.0, -100.0)
        .node("No", NodeKind::Action, 600.0, 100.0)
        .edge("Start", "Check")
        .edge("Check", "Yes")
        .edge("Check", "No")
        .edge("Yes", "No")
        .build();

    let check = store.nodes()[1].id;
    store.remove_node(check);

    assert_eq!(store.node_count(), 3);
    assert_eq!(store.edge_count(), 1);
    assert!(store.edges().iter().all(|e| !e.touches(check)));
}

#[test]
fn test_rejected_edges_leave_graph_unchanged() {
    let mut store = GraphBuilder::new()
        .node("A", NodeKind::Trigger, 0.0, 0.0)
        .node("B", NodeKind::Action, 300.0, 0.0)
        .edge("A", "B")
        .build();
    let (a, b) = (store.nodes()[0].id, store.nodes()[1].id);
    let before = store.export();

    assert!(store.add_edge(a, a, HandleSide::Right, HandleSide::Left).is_none());
    assert!(store.add_edge(a, b, HandleSide::Right, HandleSide::Left).is_none());
    assert!(store
        .add_edge(a, "n99".parse().unwrap(), HandleSide::Right, HandleSide::Left)
        .is_none());

    assert_eq!(store.export(), before);
}

#[test]
fn test_same_pair_different_handles_is_allowed() {
    let mut store = GraphBuilder::new()
        .node("A", NodeKind::Trigger, 0.0, 0.0)
        .node("B", NodeKind::Action, 300.0, 0.0)
        .edge("A", "B")
        .edge_between("A", HandleSide::Bottom, "B", HandleSide::Top)
        .edge_between("B", HandleSide::Left, "A", HandleSide::Right)
        .build();
    assert_eq!(store.edge_count(), 3);

    let a = store.nodes()[0].id;
    store.remove_node(a);
    assert_eq!(store.edge_count(), 0);
}

#[test]
fn test_update_node_merges_patch() {
    let mut store = GraphStore::new();
    let id = store.add_node(NodeKind::AiStep, "Summarize", "Old", Point::new(5.0, 5.0));

    store.update_node(id, NodePatch::default().description("New"));
    let node = store.node(id).unwrap();
    assert_eq!(node.label, "Summarize");
    assert_eq!(node.description, "New");
    assert_eq!(node.position, Point::new(5.0, 5.0));
}

#[test]
fn test_ids_not_reused_after_reset() {
    let mut store = GraphStore::with_default_trigger();
    store.add_node(NodeKind::Action, "X", "", Point::ZERO);
    store.reset();

    assert_eq!(store.node_count(), 1);
    assert_eq!(store.nodes()[0].id.to_string(), "n3");
    assert_eq!(store.nodes()[0].label, "Start");
    assert_eq!(store.nodes()[0].position, Point::new(100.0, 100.0));
}

#[test]
fn test_import_rejects_dangling_edge() {
    let json = r#"{
        "nodes": [
            { "id": "n1", "kind": "trigger", "label": "Start", "position": { "x": 0.0, "y": 0.0 } }
        ],
        "edges": [
            { "id": "e1", "source": "n1", "target": "n7", "sourceHandle": "right", "targetHandle": "left" }
        ]
    }"#;
    let snapshot = serde_json::from_str(json).unwrap();

    let mut store = GraphStore::with_default_trigger();
    let before = store.export();
    let err = store.import(snapshot).unwrap_err();
    assert!(matches!(err, GraphError::DanglingEdge { .. }));
    assert_eq!(store.export(), before);
}

#[test]
fn test_import_advances_id_counters() {
    let json = r#"{
        "nodes": [
            { "id": "n4", "kind": "trigger", "label": "Start", "position": { "x": 0.0, "y": 0.0 } },
            { "id": "n9", "kind": "action", "label": "Ping", "position": { "x": 300.0, "y": 0.0 } }
        ],
        "edges": [
            { "id": "e5", "source": "n4", "target": "n9", "sourceHandle": "right", "targetHandle": "left" }
        ]
    }"#;
    let mut store = GraphStore::new();
    store.import(serde_json::from_str(json).unwrap()).unwrap();

    let next = store.add_node(NodeKind::Action, "After", "", Point::ZERO);
    assert_eq!(next.to_string(), "n10");
    let a = store.nodes()[0].id;
    let edge = store
        .add_edge(next, a, HandleSide::Left, HandleSide::Right)
        .unwrap();
    assert_eq!(edge.to_string(), "e6");
}

proptest! {
    /// Any sequence of additions and removals keeps every edge attached to
    /// two distinct live nodes, with no duplicate tuple.
    #[test]
    fn prop_invariants_hold_under_random_edits(ops in prop::collection::vec((0u8..3, 0usize..8, 0usize..8, 0usize..4, 0usize..4), 1..60)) {
        let mut store = GraphStore::new();
        for (op, i, j, s, t) in ops {
            let ids: Vec<_> = store.nodes().iter().map(|n| n.id).collect();
            match op {
                0 => { store.add_node(NodeKind::Action, "N", "", Point::new(i as f32 * 10.0, j as f32 * 10.0)); }
                1 if !ids.is_empty() => {
                    let (a, b) = (ids[i % ids.len()], ids[j % ids.len()]);
                    store.add_edge(a, b, HandleSide::ALL[s], HandleSide::ALL[t]);
                }
                2 if !ids.is_empty() => store.remove_node(ids[i % ids.len()]),
                _ => {}
            }
        }

        let mut seen = std::collections::HashSet::new();
        for edge in store.edges() {
            prop_assert!(edge.source != edge.target);
            prop_assert!(store.contains_node(edge.source));
            prop_assert!(store.contains_node(edge.target));
            prop_assert!(seen.insert(edge.connection()));
        }
    }
}
