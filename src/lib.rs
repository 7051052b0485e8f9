//! # Flow Canvas: visual automation-flow editor
//!
//! Users compose automation flows as a directed graph of typed steps
//! (trigger, action, condition, AI step, integration) on an infinite,
//! pannable and zoomable canvas, wire them together by dragging between
//! connection handles, seed the canvas from a catalog of blueprints, and
//! dry-run the graph with a cosmetic simulation.
//!
//! ## Architecture
//!
//! - **Graph**: [`GraphStore`] owns nodes and edges and enforces the graph
//!   invariants on every mutation
//! - **Viewport**: [`Viewport`] maps between screen and canvas space
//! - **Geometry**: anchors, connection curves and hit-testing, all pure
//! - **Interaction**: [`InteractionController`] turns pointer events into
//!   pan, drag and connect gestures
//! - **Simulation**: [`SimulationRunner`] steps through nodes on a timer
//! - **Frontend**: eframe/egui window painting the canvas
//!
//! [`FlowEditor`] wires the first five together; the frontend only talks to
//! the editor.
//!
//! ## Configuration
//!
//! Editor preferences are stored as TOML in the platform-appropriate data
//! directory under `dev.flowcanvas.editor`. See [`config`].
//!
//! ## Example
//!
//! ```
//! use flow_canvas::{blueprint, FlowEditor};
//!
//! let mut editor = FlowEditor::default();
//! let bp = blueprint::find("lead-qualification").unwrap();
//! editor.load_blueprint(bp).unwrap();
//! assert_eq!(editor.store().node_count(), bp.nodes.len());
//! ```

pub mod blueprint;
pub mod config;
pub mod editor;
pub mod error;
pub mod frontend;
pub mod geometry;
pub mod graph;
pub mod interaction;
pub mod simulation;
pub mod viewport;

// Re-export commonly used types
pub use blueprint::{Blueprint, BlueprintError};
pub use config::EditorConfig;
pub use editor::FlowEditor;
pub use error::{FlowCanvasError, Result};
pub use graph::{GraphStore, NodeId, NodeKind};
pub use interaction::InteractionController;
pub use simulation::SimulationRunner;
pub use viewport::Viewport;
