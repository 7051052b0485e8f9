//! Canonical node/edge collections of the flow canvas.
//!
//! The store has no rendering or geometry knowledge. Every live-editing
//! operation is total: unknown ids, self-loops and duplicate connections are
//! absorbed as no-ops so the canvas never surfaces an error mid-gesture.
//! Only blueprint loading and snapshot import validate their input and report
//! failures.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, trace};

use super::error::{GraphError, GraphResult};
use super::id::{EdgeId, NodeId};
use super::kind::NodeKind;
use super::model::{Edge, GraphSnapshot, HandleSide, Node, NodePatch, RunStatus};
use crate::blueprint::{self, Blueprint, BlueprintError};
use crate::geometry::Point;

/// Where `reset` places the default trigger node.
pub const DEFAULT_TRIGGER_POSITION: Point = Point::new(100.0, 100.0);

/// Label of the default trigger node.
pub const DEFAULT_TRIGGER_LABEL: &str = "Start";

/// Largest node or edge id accepted by [`GraphStore::import`].
///
/// Half the `u32` range stays free so the counters never overflow after an
/// import.
pub const MAX_IMPORTED_ID: u32 = u32::MAX / 2;

/// Owner of the graph's nodes and edges.
///
/// Nodes keep insertion order, which is also the paint order of the renderer
/// and the order the simulation runner visits them in.
#[derive(Debug, Clone)]
pub struct GraphStore {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    next_node: u32,
    next_edge: u32,
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            next_node: 1,
            next_edge: 1,
        }
    }

    /// Create a store holding only the default trigger node.
    pub fn with_default_trigger() -> Self {
        let mut store = Self::new();
        store.reset();
        store
    }

    // ==================== Queries ====================

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Edges with `node` as source or target.
    pub fn edges_for(&self, node: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(move |e| e.touches(node))
    }

    /// Whether an edge with exactly this 4-tuple exists.
    pub fn has_connection(
        &self,
        source: NodeId,
        target: NodeId,
        source_handle: HandleSide,
        target_handle: HandleSide,
    ) -> bool {
        let key = (source, target, source_handle, target_handle);
        self.edges.iter().any(|e| e.connection() == key)
    }

    // ==================== Node operations ====================

    /// Add a node and return its fresh id.
    pub fn add_node(
        &mut self,
        kind: NodeKind,
        label: impl Into<String>,
        description: impl Into<String>,
        position: Point,
    ) -> NodeId {
        let id = self.alloc_node_id();
        let node = Node::new(id, kind, label, description, position);
        debug!(node = %id, kind = %kind, "Added node");
        self.nodes.push(node);
        id
    }

    /// Merge `patch` into the node. Unknown ids are ignored.
    pub fn update_node(&mut self, id: NodeId, patch: NodePatch) {
        match self.nodes.iter_mut().find(|n| n.id == id) {
            Some(node) => {
                trace!(node = %id, ?patch, "Updating node");
                patch.apply_to(node);
            }
            None => trace!(node = %id, "Ignoring update of unknown node"),
        }
    }

    /// Move a node to a new canvas position. Unknown ids are ignored.
    pub fn move_node(&mut self, id: NodeId, position: Point) {
        if let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) {
            node.position = position;
        }
    }

    /// Remove a node together with every edge touching it.
    pub fn remove_node(&mut self, id: NodeId) {
        let Some(index) = self.nodes.iter().position(|n| n.id == id) else {
            trace!(node = %id, "Ignoring removal of unknown node");
            return;
        };
        self.nodes.remove(index);
        let cascaded = self.edges_for(id).count();
        self.edges.retain(|e| !e.touches(id));
        debug!(node = %id, cascaded_edges = cascaded, "Removed node");
    }

    // ==================== Edge operations ====================

    /// Connect two handles.
    ///
    /// Returns `None` without touching the graph for self-loops, duplicate
    /// 4-tuples and endpoints that are not in the store.
    pub fn add_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        source_handle: HandleSide,
        target_handle: HandleSide,
    ) -> Option<EdgeId> {
        if source == target {
            trace!(node = %source, "Rejected self-loop");
            return None;
        }
        if !self.contains_node(source) || !self.contains_node(target) {
            trace!(%source, %target, "Rejected edge to unknown node");
            return None;
        }
        if self.has_connection(source, target, source_handle, target_handle) {
            trace!(%source, %target, "Rejected duplicate edge");
            return None;
        }
        let id = self.alloc_edge_id();
        self.edges.push(Edge {
            id,
            source,
            target,
            source_handle,
            target_handle,
        });
        debug!(edge = %id, %source, %target, "Added edge");
        Some(id)
    }

    /// Remove an edge. Unknown ids are ignored.
    pub fn remove_edge(&mut self, id: EdgeId) {
        let before = self.edges.len();
        self.edges.retain(|e| e.id != id);
        if self.edges.len() != before {
            debug!(edge = %id, "Removed edge");
        }
    }

    // ==================== Run status ====================

    /// Set a node's run status. Returns `false` if the node is gone.
    pub fn set_run_status(&mut self, id: NodeId, status: RunStatus) -> bool {
        match self.nodes.iter_mut().find(|n| n.id == id) {
            Some(node) => {
                node.run_status = status;
                true
            }
            None => false,
        }
    }

    pub fn reset_run_status(&mut self) {
        for node in &mut self.nodes {
            node.run_status = RunStatus::Idle;
        }
    }

    // ==================== Whole-graph operations ====================

    /// Clear to a single default trigger node.
    pub fn reset(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.add_node(
            NodeKind::Trigger,
            DEFAULT_TRIGGER_LABEL,
            "",
            DEFAULT_TRIGGER_POSITION,
        );
        info!("Graph reset to default trigger");
    }

    /// Replace the whole graph with a laid-out copy of `blueprint`.
    ///
    /// The blueprint is validated first; on failure the store is untouched.
    pub fn load_blueprint(&mut self, blueprint: &Blueprint) -> Result<(), BlueprintError> {
        blueprint.validate()?;

        let positions = blueprint::layout(blueprint.nodes.len());
        let mut next_node = self.next_node;
        let mut next_edge = self.next_edge;
        let mut local_ids: HashMap<&str, NodeId> = HashMap::new();

        let mut nodes = Vec::with_capacity(blueprint.nodes.len());
        for (template, position) in blueprint.nodes.iter().zip(positions) {
            let id = NodeId(next_node);
            next_node += 1;
            local_ids.insert(template.id.as_str(), id);
            nodes.push(Node::new(
                id,
                template.kind,
                template.label.clone(),
                template.description.clone(),
                position,
            ));
        }

        let mut edges = Vec::with_capacity(blueprint.edges.len());
        for (index, template) in blueprint.edges.iter().enumerate() {
            let resolve = |local: &str| {
                local_ids
                    .get(local)
                    .copied()
                    .ok_or_else(|| BlueprintError::UnknownNode {
                        blueprint: blueprint.id.clone(),
                        edge_index: index,
                        node: local.to_string(),
                    })
            };
            let source = resolve(&template.source)?;
            let target = resolve(&template.target)?;
            edges.push(Edge {
                id: EdgeId(next_edge),
                source,
                target,
                source_handle: template.source_handle,
                target_handle: template.target_handle,
            });
            next_edge += 1;
        }

        self.nodes = nodes;
        self.edges = edges;
        self.next_node = next_node;
        self.next_edge = next_edge;
        info!(
            blueprint = %blueprint.id,
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            "Loaded blueprint"
        );
        Ok(())
    }

    /// Export the durable graph state as plain data.
    pub fn export(&self) -> GraphSnapshot {
        let nodes = self
            .nodes
            .iter()
            .cloned()
            .map(|mut n| {
                n.run_status = RunStatus::Idle;
                n
            })
            .collect();
        GraphSnapshot {
            nodes,
            edges: self.edges.clone(),
        }
    }

    /// Replace the graph with `snapshot` after checking every graph invariant.
    pub fn import(&mut self, snapshot: GraphSnapshot) -> GraphResult<()> {
        validate_snapshot(&snapshot)?;

        let max_node = snapshot.nodes.iter().map(|n| n.id.raw()).max().unwrap_or(0);
        let max_edge = snapshot.edges.iter().map(|e| e.id.raw()).max().unwrap_or(0);
        self.next_node = self.next_node.max(max_node + 1);
        self.next_edge = self.next_edge.max(max_edge + 1);

        self.nodes = snapshot.nodes;
        self.edges = snapshot.edges;
        self.reset_run_status();
        info!(
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            "Imported graph"
        );
        Ok(())
    }

    fn alloc_node_id(&mut self) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node += 1;
        id
    }

    fn alloc_edge_id(&mut self) -> EdgeId {
        let id = EdgeId(self.next_edge);
        self.next_edge += 1;
        id
    }
}

fn validate_snapshot(snapshot: &GraphSnapshot) -> GraphResult<()> {
    let mut node_ids = HashSet::new();
    for node in &snapshot.nodes {
        if node.id.raw() > MAX_IMPORTED_ID {
            return Err(GraphError::IdOutOfRange(node.id.to_string()));
        }
        if !node_ids.insert(node.id) {
            return Err(GraphError::DuplicateNodeId(node.id));
        }
    }

    let mut edge_ids = HashSet::new();
    let mut connections = HashSet::new();
    for edge in &snapshot.edges {
        if edge.id.raw() > MAX_IMPORTED_ID {
            return Err(GraphError::IdOutOfRange(edge.id.to_string()));
        }
        if !edge_ids.insert(edge.id) {
            return Err(GraphError::DuplicateEdgeId(edge.id));
        }
        for endpoint in [edge.source, edge.target] {
            if !node_ids.contains(&endpoint) {
                return Err(GraphError::DanglingEdge {
                    edge: edge.id,
                    node: endpoint,
                });
            }
        }
        if edge.source == edge.target {
            return Err(GraphError::SelfLoop(edge.id));
        }
        if !connections.insert(edge.connection()) {
            return Err(GraphError::DuplicateConnection(edge.id));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn two_connected() -> (GraphStore, NodeId, NodeId, EdgeId) {
        let mut store = GraphStore::new();
        let a = store.add_node(NodeKind::Trigger, "Start", "", Point::ZERO);
        let b = store.add_node(NodeKind::Action, "Send", "", Point::new(200.0, 0.0));
        let e = store
            .add_edge(a, b, HandleSide::Right, HandleSide::Left)
            .unwrap();
        (store, a, b, e)
    }

    #[test]
    fn test_reference_scenario() {
        let mut store = GraphStore::new();
        let n1 = store.add_node(NodeKind::Trigger, "Start", "", Point::new(0.0, 0.0));
        let n2 = store.add_node(NodeKind::Action, "Send", "", Point::new(200.0, 0.0));
        assert_eq!(n1.to_string(), "n1");
        assert_eq!(n2.to_string(), "n2");

        let e1 = store.add_edge(n1, n2, HandleSide::Right, HandleSide::Left);
        assert_eq!(e1.map(|e| e.to_string()), Some("e1".to_string()));
        assert_eq!(store.edge_count(), 1);

        assert_eq!(store.add_edge(n1, n2, HandleSide::Right, HandleSide::Left), None);
        assert_eq!(store.edge_count(), 1);

        store.remove_node(n1);
        assert_eq!(store.node_count(), 1);
        assert_eq!(store.nodes()[0].id, n2);
        assert_eq!(store.edge_count(), 0);
    }

    #[test]
    fn test_self_loop_rejected() {
        let mut store = GraphStore::new();
        let a = store.add_node(NodeKind::Condition, "Check", "", Point::ZERO);
        for side in HandleSide::ALL {
            assert_eq!(store.add_edge(a, a, side, side.opposite()), None);
        }
        assert_eq!(store.edge_count(), 0);
    }

    #[test]
    fn test_same_nodes_different_handles_allowed() {
        let (mut store, a, b, _) = two_connected();
        assert!(store
            .add_edge(a, b, HandleSide::Bottom, HandleSide::Top)
            .is_some());
        assert!(store
            .add_edge(b, a, HandleSide::Right, HandleSide::Left)
            .is_some());
        assert_eq!(store.edge_count(), 3);
    }

    #[test]
    fn test_edge_to_unknown_node_rejected() {
        let (mut store, a, _, _) = two_connected();
        assert_eq!(
            store.add_edge(a, NodeId(99), HandleSide::Right, HandleSide::Left),
            None
        );
        assert_eq!(store.edge_count(), 1);
    }

    #[test]
    fn test_cascade_removes_only_touching_edges() {
        let (mut store, a, b, _) = two_connected();
        let c = store.add_node(NodeKind::AiStep, "Draft", "", Point::ZERO);
        let kept = store
            .add_edge(b, c, HandleSide::Bottom, HandleSide::Top)
            .unwrap();
        store.remove_node(a);
        assert!(!store.contains_node(a));
        assert!(store.contains_node(b));
        assert_eq!(store.edge_count(), 1);
        assert!(store.edge(kept).is_some());
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let (mut store, _, _, e) = two_connected();
        let before = store.export();
        store.update_node(NodeId(77), NodePatch::default().label("x"));
        store.remove_node(NodeId(77));
        store.remove_edge(EdgeId(77));
        assert_eq!(store.export(), before);
        store.remove_edge(e);
        assert_eq!(store.edge_count(), 0);
    }

    #[test]
    fn test_update_node_merges_patch() {
        let (mut store, a, _, _) = two_connected();
        store.update_node(a, NodePatch::default().description("When a lead signs up"));
        let node = store.node(a).unwrap();
        assert_eq!(node.label, "Start");
        assert_eq!(node.description, "When a lead signs up");
    }

    #[test]
    fn test_reset_leaves_single_trigger() {
        let (mut store, _, _, _) = two_connected();
        store.reset();
        assert_eq!(store.node_count(), 1);
        assert_eq!(store.edge_count(), 0);
        let node = &store.nodes()[0];
        assert_eq!(node.kind, NodeKind::Trigger);
        assert_eq!(node.position, DEFAULT_TRIGGER_POSITION);
    }

    #[test]
    fn test_ids_never_reused_after_removal() {
        let mut store = GraphStore::new();
        let a = store.add_node(NodeKind::Action, "A", "", Point::ZERO);
        store.remove_node(a);
        let b = store.add_node(NodeKind::Action, "B", "", Point::ZERO);
        assert_ne!(a, b);
    }

    #[test]
    fn test_export_import_round_trip() {
        let (store, _, _, _) = two_connected();
        let snapshot = store.export();
        let mut other = GraphStore::with_default_trigger();
        other.import(snapshot.clone()).unwrap();
        assert_eq!(other.export(), snapshot);
        let fresh = other.add_node(NodeKind::Action, "Next", "", Point::ZERO);
        assert!(snapshot.nodes.iter().all(|n| n.id != fresh));
    }

    #[test]
    fn test_import_rejects_dangling_edge_atomically() {
        let (store, a, _, e) = two_connected();
        let mut snapshot = store.export();
        snapshot.nodes.retain(|n| n.id == a);
        let mut target = GraphStore::with_default_trigger();
        let before = target.export();
        let err = target.import(snapshot).unwrap_err();
        assert!(matches!(err, GraphError::DanglingEdge { edge, .. } if edge == e));
        assert_eq!(target.export(), before);
    }

    #[test]
    fn test_import_rejects_duplicate_connection() {
        let (store, _, _, _) = two_connected();
        let mut snapshot = store.export();
        let mut dup = snapshot.edges[0].clone();
        dup.id = EdgeId(50);
        snapshot.edges.push(dup);
        let err = GraphStore::new().import(snapshot).unwrap_err();
        assert_eq!(err, GraphError::DuplicateConnection(EdgeId(50)));
    }

    #[test]
    fn test_import_rejects_ids_near_counter_limit() {
        let (store, a, _, _) = two_connected();
        let mut target = GraphStore::with_default_trigger();
        let before = target.export();

        let mut snapshot = store.export();
        snapshot.nodes.retain(|n| n.id == a);
        snapshot.edges.clear();
        snapshot.nodes[0].id = NodeId(u32::MAX);
        assert_eq!(
            target.import(snapshot).unwrap_err(),
            GraphError::IdOutOfRange(format!("n{}", u32::MAX))
        );

        let mut snapshot = store.export();
        snapshot.edges[0].id = EdgeId(MAX_IMPORTED_ID + 1);
        assert!(matches!(target.import(snapshot), Err(GraphError::IdOutOfRange(_))));
        assert_eq!(target.export(), before);

        let mut snapshot = store.export();
        snapshot.nodes.retain(|n| n.id == a);
        snapshot.edges.clear();
        snapshot.nodes[0].id = NodeId(MAX_IMPORTED_ID);
        target.import(snapshot).unwrap();
        let fresh = target.add_node(NodeKind::Action, "Next", "", Point::ZERO);
        assert_eq!(fresh, NodeId(MAX_IMPORTED_ID + 1));
        assert_eq!(target.node_count(), 2);
        assert!(target
            .add_edge(NodeId(MAX_IMPORTED_ID), fresh, HandleSide::Right, HandleSide::Left)
            .is_some());
    }

    #[test]
    fn test_edges_for_lists_touching_edges() {
        let (mut store, a, b, e) = two_connected();
        let c = store.add_node(NodeKind::AiStep, "Draft", "", Point::ZERO);
        let bc = store
            .add_edge(b, c, HandleSide::Bottom, HandleSide::Top)
            .unwrap();
        let ids = |n| store.edges_for(n).map(|edge| edge.id).collect::<Vec<_>>();
        assert_eq!(ids(a), vec![e]);
        assert_eq!(ids(b), vec![e, bc]);
        assert_eq!(ids(c), vec![bc]);
    }

    proptest! {
        #[test]
        fn test_add_node_ids_pairwise_distinct(count in 1usize..200) {
            let mut store = GraphStore::new();
            let ids: Vec<_> = (0..count)
                .map(|i| store.add_node(NodeKind::Action, format!("n{}", i), "", Point::ZERO))
                .collect();
            let unique: HashSet<_> = ids.iter().copied().collect();
            prop_assert_eq!(unique.len(), ids.len());
        }

        #[test]
        fn test_duplicate_add_edge_counts_once(repeats in 1usize..10) {
            let mut store = GraphStore::new();
            let a = store.add_node(NodeKind::Trigger, "A", "", Point::ZERO);
            let b = store.add_node(NodeKind::Action, "B", "", Point::ZERO);
            for _ in 0..repeats {
                store.add_edge(a, b, HandleSide::Bottom, HandleSide::Top);
            }
            prop_assert_eq!(store.edge_count(), 1);
        }
    }
}
