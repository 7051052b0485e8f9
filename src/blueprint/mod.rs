//! Blueprint templates and their deterministic layout.
//!
//! A blueprint lists nodes without positions plus edges that reference those
//! nodes by a template-local id. Loading one into a
//! [`GraphStore`](crate::graph::GraphStore) lays the nodes out with
//! [`layout`] and replaces the whole graph.
//!
//! Blueprints come from the built-in [`catalog`] or from JSON supplied by the
//! surrounding application:
//!
//! ```ignore
//! let blueprint = Blueprint::from_json(r#"{
//!     "id": "welcome",
//!     "name": "Welcome",
//!     "category": "marketing",
//!     "nodes": [
//!         { "id": "start", "kind": "trigger", "label": "Signed up" },
//!         { "id": "mail", "kind": "action", "label": "Send welcome email" }
//!     ],
//!     "edges": [
//!         { "source": "start", "target": "mail", "sourceHandle": "right", "targetHandle": "left" }
//!     ]
//! }"#)?;
//! ```

pub mod catalog;
pub mod layout;

pub use catalog::{catalog, find};
pub use layout::{layout, COLUMN_OFFSET, LAYOUT_ORIGIN, ROW_PITCH};

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::graph::{HandleSide, NodeKind};

/// Errors raised while parsing or validating a blueprint.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlueprintError {
    #[error("Failed to parse blueprint JSON: {0}")]
    Parse(String),

    #[error("Blueprint '{blueprint}' defines node '{node}' more than once")]
    DuplicateNode { blueprint: String, node: String },

    #[error("Blueprint '{blueprint}' edge #{edge_index} references unknown node '{node}'")]
    UnknownNode {
        blueprint: String,
        edge_index: usize,
        node: String,
    },

    #[error("Blueprint '{blueprint}' edge #{edge_index} connects node '{node}' to itself")]
    SelfLoop {
        blueprint: String,
        edge_index: usize,
        node: String,
    },

    #[error("Blueprint '{blueprint}' edge #{edge_index} duplicates an earlier edge")]
    DuplicateEdge { blueprint: String, edge_index: usize },
}

/// Catalog grouping shown in the blueprint menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlueprintCategory {
    Sales,
    Marketing,
    Support,
    Scheduling,
}

impl BlueprintCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            BlueprintCategory::Sales => "Sales",
            BlueprintCategory::Marketing => "Marketing",
            BlueprintCategory::Support => "Support",
            BlueprintCategory::Scheduling => "Scheduling",
        }
    }

    pub fn all() -> &'static [BlueprintCategory] {
        &[
            BlueprintCategory::Sales,
            BlueprintCategory::Marketing,
            BlueprintCategory::Support,
            BlueprintCategory::Scheduling,
        ]
    }
}

/// Node entry of a blueprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlueprintNode {
    /// Template-local id referenced by [`BlueprintEdge`].
    pub id: String,
    pub kind: NodeKind,
    pub label: String,
    #[serde(default)]
    pub description: String,
}

/// Edge entry of a blueprint, endpoints are template-local node ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlueprintEdge {
    pub source: String,
    pub target: String,
    #[serde(alias = "sourceHandle")]
    pub source_handle: HandleSide,
    #[serde(alias = "targetHandle")]
    pub target_handle: HandleSide,
}

/// A named, categorized, read-only graph template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    pub id: String,
    pub name: String,
    pub category: BlueprintCategory,
    #[serde(default)]
    pub description: String,
    pub nodes: Vec<BlueprintNode>,
    #[serde(default)]
    pub edges: Vec<BlueprintEdge>,
}

impl Blueprint {
    /// Parse a single blueprint and validate it.
    pub fn from_json(json: &str) -> Result<Self, BlueprintError> {
        let blueprint: Blueprint =
            serde_json::from_str(json).map_err(|e| BlueprintError::Parse(e.to_string()))?;
        blueprint.validate()?;
        Ok(blueprint)
    }

    /// Parse a list of blueprints, validating each.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, BlueprintError> {
        let blueprints: Vec<Blueprint> =
            serde_json::from_str(json).map_err(|e| BlueprintError::Parse(e.to_string()))?;
        for blueprint in &blueprints {
            blueprint.validate()?;
        }
        Ok(blueprints)
    }

    /// Check local node ids are unique and every edge resolves to two
    /// distinct known nodes, with no repeated connection.
    pub fn validate(&self) -> Result<(), BlueprintError> {
        let mut ids = HashSet::new();
        for node in &self.nodes {
            if !ids.insert(node.id.as_str()) {
                return Err(BlueprintError::DuplicateNode {
                    blueprint: self.id.clone(),
                    node: node.id.clone(),
                });
            }
        }

        let mut connections = HashSet::new();
        for (edge_index, edge) in self.edges.iter().enumerate() {
            for endpoint in [&edge.source, &edge.target] {
                if !ids.contains(endpoint.as_str()) {
                    return Err(BlueprintError::UnknownNode {
                        blueprint: self.id.clone(),
                        edge_index,
                        node: endpoint.clone(),
                    });
                }
            }
            if edge.source == edge.target {
                return Err(BlueprintError::SelfLoop {
                    blueprint: self.id.clone(),
                    edge_index,
                    node: edge.source.clone(),
                });
            }
            let key = (
                edge.source.as_str(),
                edge.target.as_str(),
                edge.source_handle,
                edge.target_handle,
            );
            if !connections.insert(key) {
                return Err(BlueprintError::DuplicateEdge {
                    blueprint: self.id.clone(),
                    edge_index,
                });
            }
        }
        Ok(())
    }
}
