//! Flow graph model: nodes, edges and the store that owns them.
//!
//! # Invariants
//!
//! - node ids are unique within a graph and never reused by a store
//! - edges never form self-loops and never duplicate a
//!   `(source, target, source_handle, target_handle)` tuple
//! - removing a node removes every edge touching it in the same call
//!
//! Cycles, orphan nodes and disconnected components are all allowed: the
//! canvas is a free-form composition surface, not a validated pipeline.

pub mod document;
pub mod error;
pub mod id;
pub mod kind;
pub mod model;
pub mod store;

pub use document::{GraphDocument, GRAPH_FILE_EXTENSION};
pub use error::{GraphError, GraphResult};
pub use id::{EdgeId, NodeId, ParseIdError};
pub use kind::{NodeKind, NodeStyle};
pub use model::{Edge, GraphSnapshot, HandleSide, Node, NodePatch, RunStatus};
pub use store::{GraphStore, MAX_IMPORTED_ID};
