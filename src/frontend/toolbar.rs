//! Toolbar panel: blueprints, node palette, zoom and simulation controls.

use egui::{RichText, Ui};

use crate::blueprint::{self, BlueprintCategory};
use crate::config::EditorConfig;
use crate::editor::FlowEditor;
use crate::frontend::state::AppAction;
use crate::graph::NodeKind;

/// Render the main toolbar.
pub fn render_toolbar(ui: &mut Ui, editor: &FlowEditor, config: &EditorConfig) -> Vec<AppAction> {
    let mut actions = Vec::new();

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 4.0;

        ui.strong("Automation Flow");
        ui.separator();

        // === Graph group ===
        render_file_menu(ui, &mut actions);
        render_blueprint_menu(ui, &mut actions);
        render_node_palette(ui, &mut actions);

        ui.separator();

        // === View group ===
        if ui.button("−").on_hover_text("Zoom out").clicked() {
            actions.push(AppAction::ZoomOut);
        }
        ui.label(RichText::new(format!("{}%", editor.viewport().zoom_percent())).monospace());
        if ui.button("+").on_hover_text("Zoom in").clicked() {
            actions.push(AppAction::ZoomIn);
        }
        if ui.button("Reset View").clicked() {
            actions.push(AppAction::ResetView);
        }

        ui.separator();

        // === Simulation group ===
        if editor.simulation().is_running() {
            if ui.button("■ Stop").clicked() {
                actions.push(AppAction::StopSimulation);
            }
        } else if ui
            .button("▶ Run")
            .on_hover_text("Step through every node in order")
            .clicked()
        {
            actions.push(AppAction::RunSimulation);
        }

        // === Preferences, right-aligned ===
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let theme_icon = if config.ui.dark_mode { "☀" } else { "🌙" };
            if ui.button(theme_icon).on_hover_text("Toggle theme").clicked() {
                actions.push(AppAction::ToggleDarkMode);
            }
            let mut show_grid = config.canvas.show_grid;
            if ui.checkbox(&mut show_grid, "Grid").changed() {
                actions.push(AppAction::SetShowGrid(show_grid));
            }
        });
    });

    actions
}

fn render_file_menu(ui: &mut Ui, actions: &mut Vec<AppAction>) {
    ui.menu_button("File", |ui| {
        if ui.button("Export Graph...").clicked() {
            actions.push(AppAction::ExportGraph);
            ui.close();
        }
        if ui.button("Import Graph...").clicked() {
            actions.push(AppAction::ImportGraph);
            ui.close();
        }
        ui.separator();
        if ui.button("Reset Graph").clicked() {
            actions.push(AppAction::ResetGraph);
            ui.close();
        }
    });
}

fn render_blueprint_menu(ui: &mut Ui, actions: &mut Vec<AppAction>) {
    ui.menu_button("Blueprints", |ui| {
        for category in BlueprintCategory::all() {
            let mut entries = blueprint::catalog()
                .iter()
                .filter(|bp| bp.category == *category)
                .peekable();
            if entries.peek().is_none() {
                continue;
            }

            ui.label(RichText::new(category.display_name()).small().weak());
            for bp in entries {
                if ui
                    .button(bp.name.as_str())
                    .on_hover_text(bp.description.as_str())
                    .clicked()
                {
                    actions.push(AppAction::LoadBlueprint(bp.id.clone()));
                    ui.close();
                }
            }
            ui.separator();
        }
    });
}

fn render_node_palette(ui: &mut Ui, actions: &mut Vec<AppAction>) {
    ui.menu_button("Add Node", |ui| {
        for kind in NodeKind::all() {
            let label = format!("{} {}", kind.style().icon, kind.display_name());
            if ui.button(label).on_hover_text(kind.description()).clicked() {
                actions.push(AppAction::AddNode(*kind));
                ui.close();
            }
        }
    });
}
