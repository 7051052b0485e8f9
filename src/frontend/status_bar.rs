//! Status bar panel: graph size, zoom, gesture and simulation progress.

use egui::{Color32, RichText, Ui};

use crate::editor::FlowEditor;
use crate::frontend::state::AppAction;

/// Render the status bar.
pub fn render_status_bar(ui: &mut Ui, editor: &FlowEditor, last_error: Option<&str>) -> Vec<AppAction> {
    let mut actions = Vec::new();

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        let store = editor.store();
        ui.label(RichText::new(format!("Nodes: {}", store.node_count())).small());
        ui.label(RichText::new(format!("Edges: {}", store.edge_count())).small());

        ui.separator();

        ui.label(RichText::new(format!("Zoom: {}%", editor.viewport().zoom_percent())).small());

        ui.separator();

        ui.label(RichText::new(editor.interaction().mode().name()).small().weak());

        if let Some(current) = editor.simulation().current() {
            ui.separator();
            let label = store
                .node(current)
                .map(|n| n.label.as_str())
                .unwrap_or_default();
            ui.colored_label(Color32::YELLOW, "●");
            ui.label(RichText::new(format!("Running: {}", label)).small());
        }

        if let Some(error) = last_error {
            ui.separator();
            ui.colored_label(Color32::LIGHT_RED, RichText::new(error).small());
            if ui.small_button("✕").clicked() {
                actions.push(AppAction::DismissError);
            }
        }
    });

    actions
}
