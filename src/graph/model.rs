//! Plain data types of the flow graph.

use serde::{Deserialize, Serialize};

use super::id::{EdgeId, NodeId};
use super::kind::NodeKind;
use crate::geometry::Point;

/// Side of a node a connection attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleSide {
    Top,
    Right,
    Bottom,
    Left,
}

impl HandleSide {
    pub const ALL: [HandleSide; 4] = [
        HandleSide::Top,
        HandleSide::Right,
        HandleSide::Bottom,
        HandleSide::Left,
    ];

    pub fn opposite(self) -> HandleSide {
        match self {
            HandleSide::Top => HandleSide::Bottom,
            HandleSide::Right => HandleSide::Left,
            HandleSide::Bottom => HandleSide::Top,
            HandleSide::Left => HandleSide::Right,
        }
    }
}

/// Transient visual status set by the simulation runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunStatus {
    #[default]
    Idle,
    Processing,
    Success,
}

/// A step in the automation graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub label: String,
    #[serde(default)]
    pub description: String,
    /// Top-left corner in canvas space.
    pub position: Point,
    /// Not part of the durable graph.
    #[serde(skip)]
    pub run_status: RunStatus,
}

impl Node {
    pub fn new(
        id: NodeId,
        kind: NodeKind,
        label: impl Into<String>,
        description: impl Into<String>,
        position: Point,
    ) -> Self {
        Self {
            id,
            kind,
            label: label.into(),
            description: description.into(),
            position,
            run_status: RunStatus::Idle,
        }
    }
}

/// A directed connection between two node handles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub source_handle: HandleSide,
    pub target_handle: HandleSide,
}

impl Edge {
    /// The 4-tuple that must be unique across a graph.
    pub fn connection(&self) -> (NodeId, NodeId, HandleSide, HandleSide) {
        (self.source, self.target, self.source_handle, self.target_handle)
    }

    pub fn touches(&self, node: NodeId) -> bool {
        self.source == node || self.target == node
    }
}

/// Partial update applied by `GraphStore::update_node`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePatch {
    pub label: Option<String>,
    pub description: Option<String>,
    pub position: Option<Point>,
}

impl NodePatch {
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.description.is_none() && self.position.is_none()
    }

    pub(crate) fn apply_to(self, node: &mut Node) {
        if let Some(label) = self.label {
            node.label = label;
        }
        if let Some(description) = self.description {
            node.description = description;
        }
        if let Some(position) = self.position {
            node.position = position;
        }
    }
}

/// Plain `{nodes, edges}` export of a graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}
