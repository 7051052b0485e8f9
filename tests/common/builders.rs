//! Test data builders for creating graphs

use flow_canvas::geometry::Point;
use flow_canvas::graph::{GraphStore, HandleSide, NodeId, NodeKind};

/// Builder for small graphs with named nodes
pub struct GraphBuilder {
    store: GraphStore,
    ids: Vec<(String, NodeId)>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            store: GraphStore::new(),
            ids: Vec::new(),
        }
    }

    pub fn node(mut self, label: &str, kind: NodeKind, x: f32, y: f32) -> Self {
        let id = self.store.add_node(kind, label, "", Point::new(x, y));
        self.ids.push((label.to_string(), id));
        self
    }

    /// Connect `from`'s right handle to `to`'s left handle.
    pub fn edge(self, from: &str, to: &str) -> Self {
        self.edge_between(from, HandleSide::Right, to, HandleSide::Left)
    }

    pub fn edge_between(
        mut self,
        from: &str,
        from_side: HandleSide,
        to: &str,
        to_side: HandleSide,
    ) -> Self {
        let (source, target) = (self.id(from), self.id(to));
        let created = self.store.add_edge(source, target, from_side, to_side);
        assert!(created.is_some(), "builder edge {} -> {} rejected", from, to);
        self
    }

    pub fn id(&self, label: &str) -> NodeId {
        self.ids
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, id)| *id)
            .unwrap_or_else(|| panic!("no node labelled {}", label))
    }

    pub fn build(self) -> GraphStore {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_builder() {
        let store = GraphBuilder::new()
            .node("A", NodeKind::Trigger, 0.0, 0.0)
            .node("B", NodeKind::Action, 300.0, 0.0)
            .edge("A", "B")
            .build();

        assert_eq!(store.node_count(), 2);
        assert_eq!(store.edge_count(), 1);
    }
}
