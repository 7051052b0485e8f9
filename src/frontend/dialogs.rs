//! Node edit dialog: label and description of a single node.

use crate::graph::{Node, NodeId, NodeKind, NodePatch};

/// How the dialog was closed.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogOutcome {
    Apply(NodePatch),
    Delete,
    Cancel,
}

/// Editable copy of a node's text fields.
#[derive(Debug, Clone)]
pub struct NodeEditDialog {
    node: NodeId,
    kind: NodeKind,
    original_label: String,
    original_description: String,
    pub label: String,
    pub description: String,
}

impl NodeEditDialog {
    pub fn open(node: &Node) -> Self {
        Self {
            node: node.id,
            kind: node.kind,
            original_label: node.label.clone(),
            original_description: node.description.clone(),
            label: node.label.clone(),
            description: node.description.clone(),
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Only the fields that changed. A blank label keeps the old one.
    pub fn patch(&self) -> NodePatch {
        let mut patch = NodePatch::default();
        let label = self.label.trim();
        if !label.is_empty() && label != self.original_label {
            patch = patch.label(label);
        }
        if self.description != self.original_description {
            patch = patch.description(self.description.clone());
        }
        patch
    }

    /// Draw the dialog. Returns `Some` on the frame it is closed.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<DialogOutcome> {
        let mut outcome = None;
        let mut open = true;

        egui::Window::new(format!("Edit {}", self.kind.display_name()))
            .id(egui::Id::new("node_edit_dialog"))
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(egui::RichText::new(self.node.to_string()).small().weak());

                egui::Grid::new("node_edit_grid")
                    .num_columns(2)
                    .spacing([8.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Label:");
                        ui.text_edit_singleline(&mut self.label);
                        ui.end_row();

                        ui.label("Description:");
                        ui.add(
                            egui::TextEdit::multiline(&mut self.description)
                                .desired_rows(3)
                                .desired_width(240.0),
                        );
                        ui.end_row();
                    });

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        outcome = Some(DialogOutcome::Apply(self.patch()));
                    }
                    if ui.button("Cancel").clicked() {
                        outcome = Some(DialogOutcome::Cancel);
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Delete Node").clicked() {
                            outcome = Some(DialogOutcome::Delete);
                        }
                    });
                });

                if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                    outcome = Some(DialogOutcome::Cancel);
                }
            });

        if !open && outcome.is_none() {
            outcome = Some(DialogOutcome::Cancel);
        }
        outcome
    }
}
