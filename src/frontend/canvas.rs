//! Flow canvas: paints the graph with custom egui shapes and feeds pointer
//! input to the editor.
//!
//! Painting order is grid, edges, rubber-band, nodes, so nodes always sit
//! above the connections that attach to them.

use egui::{Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Ui};

use crate::config::CanvasConfig;
use crate::editor::FlowEditor;
use crate::frontend::state::AppAction;
use crate::frontend::{to_point, to_pos2};
use crate::geometry::{self, CubicBezier, Point};
use crate::graph::{HandleSide, Node, RunStatus};
use crate::interaction::{InteractionMode, PointerTarget};
use crate::viewport::Viewport;

/// Line segments per drawn curve.
const CURVE_SEGMENTS: usize = 32;

/// Zoom change per scrolled point.
const WHEEL_ZOOM_RATE: f32 = 0.001;

/// Grid lines closer than this on screen are skipped.
const MIN_GRID_STEP: f32 = 6.0;

const NODE_ROUNDING: f32 = 8.0;
const ARROW_SIZE: f32 = 8.0;

const PROCESSING_COLOR: Color32 = Color32::from_rgb(250, 204, 21);
const SUCCESS_COLOR: Color32 = Color32::from_rgb(34, 197, 94);
const DELETE_HOT_COLOR: Color32 = Color32::from_rgb(220, 38, 38);

/// Render the canvas and route this frame's pointer input.
pub fn render(editor: &mut FlowEditor, settings: &CanvasConfig, ui: &mut Ui) -> Vec<AppAction> {
    let mut actions = Vec::new();

    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
    let canvas_rect = response.rect;
    editor.viewport_mut().set_container_origin(to_point(canvas_rect.min));

    handle_input(editor, &response, ui, &mut actions);

    let visuals = ui.visuals().clone();
    painter.rect_filled(canvas_rect, 0.0, visuals.extreme_bg_color);

    if settings.show_grid {
        draw_grid(
            &painter,
            editor.viewport(),
            canvas_rect,
            settings.grid_spacing,
            visuals.faint_bg_color,
        );
    }

    let hovered = response.hover_pos().map(|p| editor.classify(to_point(p)));
    update_cursor(ui, editor.interaction().mode(), hovered);

    draw_edges(&painter, editor, visuals.weak_text_color());

    if let Some(curve) = editor.rubber_band() {
        let points = project(&curve, editor.viewport());
        let stroke = Stroke::new(editor.viewport().scale_len(2.0), visuals.selection.stroke.color);
        painter.extend(Shape::dashed_line(&points, stroke, 8.0, 5.0));
    }

    for node in editor.store().nodes() {
        draw_node(&painter, editor, node, hovered, &visuals);
    }

    if editor.store().is_empty() {
        painter.text(
            canvas_rect.center(),
            Align2::CENTER_CENTER,
            "Empty canvas. Add a node or load a blueprint.",
            FontId::proportional(14.0),
            visuals.weak_text_color(),
        );
    }

    actions
}

/// Translate egui pointer state into controller events.
fn handle_input(
    editor: &mut FlowEditor,
    response: &egui::Response,
    ui: &Ui,
    actions: &mut Vec<AppAction>,
) {
    let canvas_rect = response.rect;
    let (pressed, released, pointer, scroll, escape) = ui.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
            i.pointer.latest_pos(),
            i.smooth_scroll_delta.y,
            i.key_pressed(egui::Key::Escape),
        )
    });

    if response.hovered() && scroll != 0.0 {
        editor.viewport_mut().zoom_by(scroll * WHEEL_ZOOM_RATE);
    }

    if response.double_clicked() {
        if let Some(pos) = pointer {
            if let PointerTarget::NodeBody(node) = editor.classify(to_point(pos)) {
                actions.push(AppAction::EditNode(node));
            }
        }
    }

    let inside = pointer.is_some_and(|p| canvas_rect.contains(p));
    if !editor.interaction().is_idle() && (!inside || escape) {
        editor.pointer_leave();
        return;
    }

    let Some(pos) = pointer.map(to_point) else {
        return;
    };

    if pressed && response.hovered() {
        editor.pointer_down(pos);
    }
    if !editor.interaction().is_idle() {
        editor.pointer_move(pos);
    }
    if released {
        editor.pointer_up(pos);
    }
}

fn update_cursor(ui: &Ui, mode: InteractionMode, hovered: Option<PointerTarget>) {
    let icon = match (mode, hovered) {
        (InteractionMode::PanningCanvas { .. }, _) => egui::CursorIcon::Grabbing,
        (InteractionMode::DraggingNode { .. }, _) => egui::CursorIcon::Grabbing,
        (InteractionMode::ConnectingEdge { .. }, _) => egui::CursorIcon::Crosshair,
        (_, Some(PointerTarget::Handle { .. })) => egui::CursorIcon::Crosshair,
        (_, Some(PointerTarget::DeleteControl(_))) => egui::CursorIcon::PointingHand,
        (_, Some(PointerTarget::NodeBody(_))) => egui::CursorIcon::Grab,
        _ => return,
    };
    ui.ctx().set_cursor_icon(icon);
}

fn project(curve: &CubicBezier, viewport: &Viewport) -> Vec<Pos2> {
    curve
        .map(|p| viewport.canvas_to_screen(p))
        .sample(CURVE_SEGMENTS)
        .into_iter()
        .map(to_pos2)
        .collect()
}

fn draw_grid(painter: &egui::Painter, viewport: &Viewport, rect: egui::Rect, spacing: f32, color: Color32) {
    let step = viewport.scale_len(spacing);
    if !step.is_finite() || step < MIN_GRID_STEP {
        return;
    }

    let origin = to_pos2(viewport.canvas_to_screen(Point::ZERO));
    let stroke = Stroke::new(1.0, color);

    let mut x = rect.left() + (origin.x - rect.left()).rem_euclid(step);
    while x < rect.right() {
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
        x += step;
    }
    let mut y = rect.top() + (origin.y - rect.top()).rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
        y += step;
    }
}

fn draw_edges(painter: &egui::Painter, editor: &FlowEditor, idle_color: Color32) {
    let store = editor.store();
    let viewport = editor.viewport();
    let metrics = editor.interaction().metrics();
    let width = viewport.scale_len(2.0);

    for edge in store.edges() {
        let (Some(source), Some(target)) = (store.node(edge.source), store.node(edge.target)) else {
            continue;
        };

        let color = if source.run_status == RunStatus::Success && target.run_status != RunStatus::Idle {
            SUCCESS_COLOR
        } else {
            idle_color
        };

        let curve = geometry::edge_path(source, edge.source_handle, target, edge.target_handle, metrics);
        painter.add(Shape::line(project(&curve, viewport), Stroke::new(width, color)));
        draw_arrow_head(painter, viewport, curve.to, edge.target_handle, color);
    }
}

/// Filled triangle pointing into the target handle.
fn draw_arrow_head(
    painter: &egui::Painter,
    viewport: &Viewport,
    tip: Point,
    side: HandleSide,
    color: Color32,
) {
    let out = geometry::outward(side);
    let normal = geometry::Vec2::new(-out.y, out.x);
    let base = tip + out * ARROW_SIZE;
    let half = normal * (ARROW_SIZE * 0.5);

    let points = [tip, base + half, base - half]
        .into_iter()
        .map(|p| to_pos2(viewport.canvas_to_screen(p)))
        .collect();
    painter.add(Shape::convex_polygon(points, color, Stroke::NONE));
}

fn draw_node(
    painter: &egui::Painter,
    editor: &FlowEditor,
    node: &Node,
    hovered: Option<PointerTarget>,
    visuals: &egui::Visuals,
) {
    let viewport = editor.viewport();
    let metrics = editor.interaction().metrics();
    let zoom = viewport.zoom();

    let rect = egui::Rect::from_min_size(
        to_pos2(viewport.canvas_to_screen(node.position)),
        egui::vec2(viewport.scale_len(metrics.width), viewport.scale_len(metrics.height)),
    );
    let style = node.kind.style();
    let accent = Color32::from_rgb(style.accent[0], style.accent[1], style.accent[2]);
    let rounding = NODE_ROUNDING * zoom;

    painter.rect_filled(rect, rounding, visuals.window_fill);

    // Accent strip along the left edge
    let strip = egui::Rect::from_min_size(rect.min, egui::vec2(6.0 * zoom, rect.height()));
    painter.rect_filled(strip, 0.0, accent);

    let body_hovered = hovered == Some(PointerTarget::NodeBody(node.id));
    let (stroke_color, stroke_width) = match node.run_status {
        RunStatus::Processing => (PROCESSING_COLOR, 3.0),
        RunStatus::Success => (SUCCESS_COLOR, 2.5),
        RunStatus::Idle if body_hovered => (accent, 1.5),
        RunStatus::Idle => (visuals.widgets.noninteractive.bg_stroke.color, 1.0),
    };
    painter.rect_stroke(
        rect,
        rounding,
        Stroke::new(stroke_width * zoom, stroke_color),
        egui::StrokeKind::Outside,
    );

    // Text
    let text_left = rect.left() + 16.0 * zoom;
    painter.text(
        Pos2::new(text_left, rect.top() + 20.0 * zoom),
        Align2::LEFT_CENTER,
        format!("{} {}", style.icon, node.label),
        FontId::proportional(14.0 * zoom),
        visuals.strong_text_color(),
    );
    painter.text(
        Pos2::new(text_left, rect.top() + 40.0 * zoom),
        Align2::LEFT_CENTER,
        node.kind.display_name(),
        FontId::proportional(10.0 * zoom),
        accent,
    );
    if !node.description.is_empty() {
        painter.text(
            Pos2::new(text_left, rect.top() + 60.0 * zoom),
            Align2::LEFT_CENTER,
            truncate(&node.description, 34),
            FontId::proportional(11.0 * zoom),
            visuals.weak_text_color(),
        );
    }

    // Handles
    for side in HandleSide::ALL {
        let anchor = to_pos2(viewport.canvas_to_screen(geometry::handle_anchor(node, side, metrics)));
        let hot = hovered == Some(PointerTarget::Handle { node: node.id, side });
        let (radius, color) = if hot {
            (metrics.handle_radius * 1.5, accent)
        } else {
            (metrics.handle_radius, Color32::from_gray(200))
        };
        painter.circle_filled(anchor, viewport.scale_len(radius), color);
    }

    // Delete control
    let center = to_pos2(viewport.canvas_to_screen(metrics.delete_control_center(node)));
    let radius = viewport.scale_len(metrics.delete_radius);
    let hot = hovered == Some(PointerTarget::DeleteControl(node.id));
    let fill = if hot { DELETE_HOT_COLOR } else { Color32::from_gray(110) };
    painter.circle_filled(center, radius, fill);
    let d = radius * 0.45;
    let cross = Stroke::new(1.5 * zoom, Color32::WHITE);
    painter.line_segment([center + egui::vec2(-d, -d), center + egui::vec2(d, d)], cross);
    painter.line_segment([center + egui::vec2(-d, d), center + egui::vec2(d, -d)], cross);
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut short: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        short.push('…');
        short
    }
}
