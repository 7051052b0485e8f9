//! The flow editor: one graph store, viewport, interaction controller and
//! simulation runner wired together.
//!
//! Each holder stays independently testable; this type only applies the
//! cross-cutting effects, e.g. loading a blueprint also resets the view,
//! cancels the active gesture and stops any simulation.

use std::time::Instant;

use tracing::info;

use crate::blueprint::{Blueprint, BlueprintError};
use crate::config::EditorConfig;
use crate::geometry::{CubicBezier, Point};
use crate::graph::{
    EdgeId, GraphResult, GraphSnapshot, GraphStore, HandleSide, NodeId, NodeKind, NodePatch,
};
use crate::interaction::{InteractionController, PointerTarget};
use crate::simulation::{SimulationRunner, StatusTransition};
use crate::viewport::Viewport;

#[derive(Debug, Clone)]
pub struct FlowEditor {
    store: GraphStore,
    viewport: Viewport,
    interaction: InteractionController,
    simulation: SimulationRunner,
    zoom_step: f32,
}

impl Default for FlowEditor {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl FlowEditor {
    /// Create an editor holding the default trigger node.
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            store: GraphStore::with_default_trigger(),
            viewport: Viewport::new(),
            interaction: InteractionController::new(
                config.metrics(),
                config.canvas.handle_tolerance,
            ),
            simulation: SimulationRunner::new(config.simulation.step_interval()),
            zoom_step: config.canvas.zoom_step,
        }
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn interaction(&self) -> &InteractionController {
        &self.interaction
    }

    pub fn simulation(&self) -> &SimulationRunner {
        &self.simulation
    }

    // ==================== Graph editing ====================

    pub fn add_node(
        &mut self,
        kind: NodeKind,
        label: impl Into<String>,
        description: impl Into<String>,
        position: Point,
    ) -> NodeId {
        self.store.add_node(kind, label, description, position)
    }

    /// Add a node of `kind` centred on the given screen point.
    pub fn add_node_at_screen(&mut self, kind: NodeKind, screen: Point) -> NodeId {
        let metrics = self.interaction.metrics();
        let center = self.viewport.screen_to_canvas(screen);
        let top_left = Point::new(center.x - metrics.width / 2.0, center.y - metrics.height / 2.0);
        self.store.add_node(kind, kind.default_label(), "", top_left)
    }

    /// Apply a patch from the node-edit dialog.
    pub fn edit_node(&mut self, id: NodeId, patch: NodePatch) {
        self.store.update_node(id, patch);
    }

    pub fn delete_node(&mut self, id: NodeId) {
        if self.interaction.dragged_node() == Some(id) {
            self.interaction.cancel();
        }
        self.store.remove_node(id);
    }

    pub fn add_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        source_handle: HandleSide,
        target_handle: HandleSide,
    ) -> Option<EdgeId> {
        self.store.add_edge(source, target, source_handle, target_handle)
    }

    /// Clear to the default trigger node.
    pub fn reset(&mut self) {
        self.interaction.cancel();
        self.simulation.cancel();
        self.store.reset();
    }

    /// Replace the graph with `blueprint` and reset the view.
    pub fn load_blueprint(&mut self, blueprint: &Blueprint) -> Result<(), BlueprintError> {
        self.store.load_blueprint(blueprint)?;
        self.after_replace();
        info!(blueprint = %blueprint.name, "Blueprint applied to editor");
        Ok(())
    }

    pub fn export(&self) -> GraphSnapshot {
        self.store.export()
    }

    /// Replace the graph with an imported snapshot and reset the view.
    pub fn import(&mut self, snapshot: GraphSnapshot) -> GraphResult<()> {
        self.store.import(snapshot)?;
        self.after_replace();
        Ok(())
    }

    fn after_replace(&mut self) {
        self.interaction.cancel();
        self.simulation.cancel();
        self.viewport.reset_view();
    }

    // ==================== View ====================

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_by(self.zoom_step);
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_by(-self.zoom_step);
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset_view();
    }

    // ==================== Pointer input ====================

    pub fn pointer_down(&mut self, screen: Point) -> PointerTarget {
        self.interaction
            .pointer_down(screen, &mut self.store, &self.viewport)
    }

    pub fn pointer_move(&mut self, screen: Point) {
        self.interaction
            .pointer_move(screen, &mut self.store, &mut self.viewport);
    }

    pub fn pointer_up(&mut self, screen: Point) -> Option<EdgeId> {
        self.interaction
            .pointer_up(screen, &mut self.store, &self.viewport)
    }

    pub fn pointer_leave(&mut self) {
        self.interaction.pointer_leave();
    }

    pub fn classify(&self, screen: Point) -> PointerTarget {
        self.interaction.classify(screen, &self.store, &self.viewport)
    }

    pub fn rubber_band(&self) -> Option<CubicBezier> {
        self.interaction.rubber_band(&self.store)
    }

    // ==================== Simulation ====================

    pub fn run_simulation(&mut self, now: Instant) -> Vec<StatusTransition> {
        self.simulation.start(&mut self.store, now)
    }

    pub fn tick(&mut self, now: Instant) -> Vec<StatusTransition> {
        self.simulation.tick(&mut self.store, now)
    }

    pub fn stop_simulation(&mut self) {
        self.simulation.cancel();
    }
}
