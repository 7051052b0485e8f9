//! Frontend module for egui UI
//!
//! The window is a toolbar, a status bar and the flow canvas. Panels render
//! from a shared [`FlowEditor`] and return [`AppAction`]s, which
//! [`FlowCanvasApp`] applies once the frame is drawn. Pointer input is the
//! exception: the canvas feeds it straight to the editor so drags track the
//! pointer within the same frame.
//!
//! # Submodules
//!
//! - `canvas` - Graph painting and pointer routing
//! - `dialogs` - Node edit dialog
//! - `toolbar` - Blueprints, node palette, zoom and run controls
//! - `status_bar` - Graph size, zoom, gesture and simulation progress

pub mod canvas;
pub mod dialogs;
pub mod state;
pub mod status_bar;
pub mod toolbar;

pub use state::AppAction;

use std::path::PathBuf;
use std::time::Instant;

use egui::Pos2;

use crate::blueprint;
use crate::config::EditorConfig;
use crate::editor::FlowEditor;
use crate::error::{FlowCanvasError, Result, ResultExt};
use crate::geometry::Point;
use crate::graph::{GraphDocument, GRAPH_FILE_EXTENSION};
use dialogs::{DialogOutcome, NodeEditDialog};

pub(crate) fn to_pos2(p: Point) -> Pos2 {
    Pos2::new(p.x, p.y)
}

pub(crate) fn to_point(p: Pos2) -> Point {
    Point::new(p.x, p.y)
}

/// Main application state
pub struct FlowCanvasApp {
    editor: FlowEditor,
    config: EditorConfig,
    node_dialog: Option<NodeEditDialog>,
    /// Centre of the canvas last frame, where palette nodes are placed.
    canvas_center: Option<Pos2>,
    /// Name written into exported documents.
    graph_name: String,
    /// Theme currently applied to the context.
    applied_dark_mode: Option<bool>,
    last_error: Option<String>,
}

impl FlowCanvasApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: EditorConfig) -> Self {
        Self::with_config(config)
    }

    /// Build the app state without a window, restoring the last blueprint.
    pub fn with_config(config: EditorConfig) -> Self {
        let mut app = Self {
            editor: FlowEditor::new(&config),
            config,
            node_dialog: None,
            canvas_center: None,
            graph_name: "Untitled Flow".to_string(),
            applied_dark_mode: None,
            last_error: None,
        };

        if let Some(id) = app.config.ui.last_blueprint.clone() {
            if let Err(e) = app.load_blueprint(&id) {
                tracing::warn!("Could not restore blueprint {}: {}", id, e);
            }
        }
        app
    }

    pub fn editor(&self) -> &FlowEditor {
        &self.editor
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn handle_action(&mut self, action: AppAction) {
        tracing::debug!(?action, "Handling action");
        match action {
            AppAction::LoadBlueprint(id) => {
                if let Err(e) = self.load_blueprint(&id) {
                    self.last_error = Some(e.to_string());
                } else {
                    self.config.ui.last_blueprint = Some(id);
                    self.save_config();
                }
            }
            AppAction::AddNode(kind) => {
                let center = self.canvas_center.map(to_point).unwrap_or_else(|| {
                    self.editor
                        .viewport()
                        .canvas_to_screen(crate::graph::store::DEFAULT_TRIGGER_POSITION)
                });
                self.editor.add_node_at_screen(kind, center);
            }
            AppAction::EditNode(id) => {
                if let Some(node) = self.editor.store().node(id) {
                    self.node_dialog = Some(NodeEditDialog::open(node));
                }
            }
            AppAction::ApplyNodePatch { node, patch } => {
                if !patch.is_empty() {
                    self.editor.edit_node(node, patch);
                }
            }
            AppAction::DeleteNode(id) => {
                self.editor.delete_node(id);
                if self.node_dialog.as_ref().is_some_and(|d| d.node() == id) {
                    self.node_dialog = None;
                }
            }
            AppAction::ResetGraph => {
                self.editor.reset();
                self.node_dialog = None;
                self.graph_name = "Untitled Flow".to_string();
            }
            AppAction::ExportGraph => {
                if let Some(path) = rfd::FileDialog::new()
                    .set_title("Export Graph")
                    .add_filter("Flow Graph", &[GRAPH_FILE_EXTENSION])
                    .set_file_name(format!("{}.{}", self.graph_name, GRAPH_FILE_EXTENSION))
                    .save_file()
                {
                    if let Err(e) = self.export_to(&path) {
                        self.last_error = Some(format!("Failed to export graph: {}", e));
                    }
                }
            }
            AppAction::ImportGraph => {
                if let Some(path) = rfd::FileDialog::new()
                    .set_title("Import Graph")
                    .add_filter("Flow Graph", &[GRAPH_FILE_EXTENSION])
                    .pick_file()
                {
                    if let Err(e) = self.import_from(path) {
                        self.last_error = Some(format!("Failed to import graph: {}", e));
                    }
                }
            }
            AppAction::ZoomIn => self.editor.zoom_in(),
            AppAction::ZoomOut => self.editor.zoom_out(),
            AppAction::ResetView => self.editor.reset_view(),
            AppAction::RunSimulation => {
                self.editor.run_simulation(Instant::now());
            }
            AppAction::StopSimulation => self.editor.stop_simulation(),
            AppAction::SetShowGrid(show) => {
                self.config.canvas.show_grid = show;
                self.save_config();
            }
            AppAction::ToggleDarkMode => {
                self.config.ui.dark_mode = !self.config.ui.dark_mode;
                self.save_config();
            }
            AppAction::DismissError => self.last_error = None,
        }
    }

    fn load_blueprint(&mut self, id: &str) -> Result<()> {
        let bp = blueprint::find(id)
            .ok_or_else(|| FlowCanvasError::Config(format!("Unknown blueprint '{}'", id)))?;
        self.editor.load_blueprint(bp)?;
        self.node_dialog = None;
        self.graph_name = bp.name.clone();
        Ok(())
    }

    /// Write the current graph as a [`GraphDocument`].
    pub fn export_to(&self, path: &std::path::Path) -> Result<()> {
        GraphDocument::new(self.graph_name.clone(), self.editor.export())
            .save(path)
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::info!("Exported graph to {:?}", path);
        Ok(())
    }

    /// Replace the graph with a [`GraphDocument`] read from `path`.
    pub fn import_from(&mut self, path: PathBuf) -> Result<()> {
        let document = GraphDocument::load(&path)?;
        self.editor.import(document.graph)?;
        self.node_dialog = None;
        self.graph_name = document.name;
        tracing::info!("Imported graph from {:?}", path);
        Ok(())
    }

    fn save_config(&self) {
        if let Err(e) = self.config.save() {
            tracing::warn!("Failed to save editor config: {}", e);
        }
    }

    fn sync_visuals(&mut self, ctx: &egui::Context) {
        let dark = self.config.ui.dark_mode;
        if self.applied_dark_mode != Some(dark) {
            ctx.set_visuals(if dark {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            });
            self.applied_dark_mode = Some(dark);
        }
    }

    fn show_node_dialog(&mut self, ctx: &egui::Context, actions: &mut Vec<AppAction>) {
        let Some(dialog) = self.node_dialog.as_mut() else {
            return;
        };
        let node = dialog.node();
        let Some(outcome) = dialog.show(ctx) else {
            return;
        };

        self.node_dialog = None;
        match outcome {
            DialogOutcome::Apply(patch) => actions.push(AppAction::ApplyNodePatch { node, patch }),
            DialogOutcome::Delete => actions.push(AppAction::DeleteNode(node)),
            DialogOutcome::Cancel => {}
        }
    }
}

impl eframe::App for FlowCanvasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync_visuals(ctx);

        let now = Instant::now();
        self.editor.tick(now);
        if let Some(deadline) = self.editor.simulation().next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }

        let mut actions = Vec::new();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            actions.extend(toolbar::render_toolbar(ui, &self.editor, &self.config));
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            actions.extend(status_bar::render_status_bar(
                ui,
                &self.editor,
                self.last_error.as_deref(),
            ));
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.canvas_center = Some(ui.max_rect().center());
                // A modal dialog owns the pointer while it is open
                if self.node_dialog.is_some() {
                    ui.disable();
                }
                actions.extend(canvas::render(&mut self.editor, &self.config.canvas, ui));
            });

        self.show_node_dialog(ctx, &mut actions);

        for action in actions {
            self.handle_action(action);
        }
    }
}
