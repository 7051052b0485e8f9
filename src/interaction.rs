//! Pointer interaction state machine for the flow canvas.
//!
//! Exactly one [`InteractionMode`] is active at a time. A pointer-down is
//! classified by hit-testing in priority order
//! (handle > delete control > node body > background) and commits its mode
//! before returning, so the following pointer-move always reads a consistent
//! start state.
//!
//! ```text
//!            down on handle              up (edge or abandon)
//!   Idle ───────────────────► Connecting ───────────────────► Idle
//!    │  down on body                    up / leave
//!    ├──────────────────────► Dragging ───────────────────► Idle
//!    │  down on background              up / leave
//!    └──────────────────────► Panning  ───────────────────► Idle
//! ```
//!
//! Invalid connections (self-loop, duplicate) are dropped silently; the
//! rubber-band simply disappears.

use tracing::{debug, trace};

use crate::geometry::{self, CubicBezier, NodeMetrics, Point, Vec2};
use crate::graph::{EdgeId, GraphStore, HandleSide, NodeId, NodePatch};
use crate::viewport::Viewport;

/// Default handle grab radius in screen pixels.
pub const DEFAULT_HANDLE_TOLERANCE: f32 = 10.0;

/// What a pointer position hits on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Handle { node: NodeId, side: HandleSide },
    DeleteControl(NodeId),
    NodeBody(NodeId),
    Background,
}

/// The active pointer-driven operation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    PanningCanvas {
        /// Screen position of the pointer-down.
        pointer_start: Point,
        pan_at_start: Vec2,
    },
    DraggingNode {
        node: NodeId,
        /// Canvas position of the node at pointer-down.
        node_start: Point,
        /// Screen position of the pointer-down.
        pointer_start: Point,
    },
    ConnectingEdge {
        source: NodeId,
        source_handle: HandleSide,
        /// Live pointer position in canvas space.
        pointer: Point,
    },
}

impl InteractionMode {
    pub fn name(&self) -> &'static str {
        match self {
            InteractionMode::Idle => "Idle",
            InteractionMode::PanningCanvas { .. } => "Panning",
            InteractionMode::DraggingNode { .. } => "Dragging",
            InteractionMode::ConnectingEdge { .. } => "Connecting",
        }
    }
}

/// Consumes pointer events and mutates the graph store and viewport.
#[derive(Debug, Clone)]
pub struct InteractionController {
    mode: InteractionMode,
    metrics: NodeMetrics,
    /// Handle grab radius in screen pixels.
    handle_tolerance: f32,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(NodeMetrics::default(), DEFAULT_HANDLE_TOLERANCE)
    }
}

impl InteractionController {
    pub fn new(metrics: NodeMetrics, handle_tolerance: f32) -> Self {
        Self {
            mode: InteractionMode::Idle,
            metrics,
            handle_tolerance,
        }
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn is_idle(&self) -> bool {
        self.mode == InteractionMode::Idle
    }

    pub fn metrics(&self) -> &NodeMetrics {
        &self.metrics
    }

    /// Node currently being dragged, if any.
    pub fn dragged_node(&self) -> Option<NodeId> {
        match self.mode {
            InteractionMode::DraggingNode { node, .. } => Some(node),
            _ => None,
        }
    }

    /// Hit-test a screen position against the graph.
    ///
    /// Nodes are tested topmost first, i.e. in reverse store order since the
    /// renderer paints in store order. For each node the handle wins over the
    /// delete control, which wins over the body.
    pub fn classify(&self, screen: Point, store: &GraphStore, viewport: &Viewport) -> PointerTarget {
        let canvas = viewport.screen_to_canvas(screen);
        let tolerance = self.handle_tolerance / viewport.zoom();

        // Handles sit on the border and may stick out of a node painted
        // above, so they are checked across all nodes before any body.
        for node in store.nodes().iter().rev() {
            if let Some(side) = geometry::hit_test_handle(node, canvas, tolerance, &self.metrics) {
                return PointerTarget::Handle {
                    node: node.id,
                    side,
                };
            }
        }
        for node in store.nodes().iter().rev() {
            if geometry::hit_test_delete_control(node, canvas, &self.metrics) {
                return PointerTarget::DeleteControl(node.id);
            }
            if geometry::hit_test_node_body(node, canvas, &self.metrics) {
                return PointerTarget::NodeBody(node.id);
            }
        }
        PointerTarget::Background
    }

    /// Start a gesture. Ignored while another gesture is active.
    pub fn pointer_down(
        &mut self,
        screen: Point,
        store: &mut GraphStore,
        viewport: &Viewport,
    ) -> PointerTarget {
        let target = self.classify(screen, store, viewport);
        if !self.is_idle() {
            trace!(mode = self.mode.name(), "Ignoring pointer-down during active gesture");
            return target;
        }

        match target {
            PointerTarget::Handle { node, side } => {
                self.mode = InteractionMode::ConnectingEdge {
                    source: node,
                    source_handle: side,
                    pointer: viewport.screen_to_canvas(screen),
                };
            }
            PointerTarget::DeleteControl(node) => {
                store.remove_node(node);
            }
            PointerTarget::NodeBody(node) => {
                if let Some(n) = store.node(node) {
                    self.mode = InteractionMode::DraggingNode {
                        node,
                        node_start: n.position,
                        pointer_start: screen,
                    };
                }
            }
            PointerTarget::Background => {
                self.mode = InteractionMode::PanningCanvas {
                    pointer_start: screen,
                    pan_at_start: viewport.pan(),
                };
            }
        }
        trace!(?target, mode = self.mode.name(), "Pointer down");
        target
    }

    /// Advance the active gesture to the pointer's current screen position.
    pub fn pointer_move(&mut self, screen: Point, store: &mut GraphStore, viewport: &mut Viewport) {
        match &mut self.mode {
            InteractionMode::Idle => {}
            InteractionMode::PanningCanvas {
                pointer_start,
                pan_at_start,
            } => {
                let pan = *pan_at_start + (screen - *pointer_start);
                viewport.pan_to(pan.x, pan.y);
            }
            InteractionMode::DraggingNode {
                node,
                node_start,
                pointer_start,
            } => {
                let delta = (screen - *pointer_start) / viewport.zoom();
                store.update_node(*node, NodePatch::default().position(*node_start + delta));
            }
            InteractionMode::ConnectingEdge { pointer, .. } => {
                *pointer = viewport.screen_to_canvas(screen);
            }
        }
    }

    /// Finish the active gesture.
    ///
    /// Returns the id of the edge created when a connection is released over
    /// another node's handle and the store accepts it.
    pub fn pointer_up(
        &mut self,
        screen: Point,
        store: &mut GraphStore,
        viewport: &Viewport,
    ) -> Option<EdgeId> {
        let mode = std::mem::take(&mut self.mode);
        let InteractionMode::ConnectingEdge {
            source,
            source_handle,
            ..
        } = mode
        else {
            return None;
        };

        match self.classify(screen, store, viewport) {
            PointerTarget::Handle { node, side } if node != source => {
                let edge = store.add_edge(source, node, source_handle, side);
                if edge.is_none() {
                    debug!(%source, target = %node, "Connection rejected");
                }
                edge
            }
            _ => {
                trace!(%source, "Connection abandoned");
                None
            }
        }
    }

    /// The pointer left the canvas: cancel whatever is in progress.
    ///
    /// Moves already applied stay applied; a pending connection never
    /// creates an edge.
    pub fn pointer_leave(&mut self) {
        if !self.is_idle() {
            trace!(mode = self.mode.name(), "Pointer left canvas, cancelling");
        }
        self.cancel();
    }

    pub fn cancel(&mut self) {
        self.mode = InteractionMode::Idle;
    }

    /// Dashed preview curve from the source handle to the live pointer.
    pub fn rubber_band(&self, store: &GraphStore) -> Option<CubicBezier> {
        let InteractionMode::ConnectingEdge {
            source,
            source_handle,
            pointer,
        } = self.mode
        else {
            return None;
        };
        let node = store.node(source)?;
        let anchor = geometry::handle_anchor(node, source_handle, &self.metrics);
        Some(geometry::connection_path(
            anchor,
            source_handle,
            pointer,
            source_handle.opposite(),
        ))
    }
}
