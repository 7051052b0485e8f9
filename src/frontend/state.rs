//! Actions emitted by UI panels and applied by the app after each frame.

use crate::graph::{NodeId, NodeKind, NodePatch};

/// Actions that can be triggered by the UI.
///
/// Panels never mutate the editor for anything beyond pointer input; the
/// app drains these once rendering is done.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    // Graph
    /// Replace the graph with a catalog blueprint
    LoadBlueprint(String),
    /// Add a node of this kind at the centre of the canvas
    AddNode(NodeKind),
    /// Open the edit dialog for a node
    EditNode(NodeId),
    /// Apply the edit dialog's changes
    ApplyNodePatch { node: NodeId, patch: NodePatch },
    /// Delete a node and its edges
    DeleteNode(NodeId),
    /// Clear to the default trigger node
    ResetGraph,
    /// Save the graph to a file chosen by the user
    ExportGraph,
    /// Load a graph from a file chosen by the user
    ImportGraph,

    // View
    ZoomIn,
    ZoomOut,
    ResetView,

    // Simulation
    RunSimulation,
    StopSimulation,

    // Preferences
    SetShowGrid(bool),
    ToggleDarkMode,

    /// Clear the error shown in the status bar
    DismissError,
}
