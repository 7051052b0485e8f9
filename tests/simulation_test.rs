//! Integration tests for the simulation runner
//!
//! Time is injected, so these tests step through a run deterministically
//! instead of sleeping.

mod common;

use common::builders::GraphBuilder;
use common::test_step;
use flow_canvas::graph::{GraphStore, NodeKind, RunStatus};
use flow_canvas::simulation::{plan, SimulationRunner};
use flow_canvas::{EditorConfig, FlowEditor};
use std::time::Instant;

fn statuses(store: &GraphStore) -> Vec<RunStatus> {
    store.nodes().iter().map(|n| n.run_status).collect()
}

fn editor_with_step() -> FlowEditor {
    let mut config = EditorConfig::default();
    config.simulation.step_interval_ms = test_step().as_millis() as u64;
    FlowEditor::new(&config)
}

#[test]
fn test_run_ignores_edge_order() {
    // Edges point backwards; the run still follows insertion order
    let mut store = GraphBuilder::new()
        .node("C", NodeKind::Action, 600.0, 0.0)
        .node("B", NodeKind::Condition, 300.0, 0.0)
        .node("A", NodeKind::Trigger, 0.0, 0.0)
        .edge("A", "B")
        .edge("B", "C")
        .build();
    let ids: Vec<_> = store.nodes().iter().map(|n| n.id).collect();

    let mut runner = SimulationRunner::new(test_step());
    let t0 = Instant::now();
    let mut order = Vec::new();
    order.extend(runner.start(&mut store, t0));
    for i in 1..=3 {
        order.extend(runner.tick(&mut store, t0 + test_step() * i));
    }

    let processing: Vec<_> = order
        .iter()
        .filter(|t| t.status == RunStatus::Processing)
        .map(|t| t.node)
        .collect();
    assert_eq!(processing, ids);
    assert_eq!(statuses(&store), vec![RunStatus::Success; 3]);
}

#[test]
fn test_at_most_one_node_processing() {
    let mut editor = editor_with_step();
    editor
        .load_blueprint(flow_canvas::blueprint::find("lead-qualification").unwrap())
        .unwrap();

    let t0 = Instant::now();
    editor.run_simulation(t0);
    for ms in (0..=700).step_by(25) {
        editor.tick(t0 + std::time::Duration::from_millis(ms));
        let processing = statuses(editor.store())
            .into_iter()
            .filter(|s| *s == RunStatus::Processing)
            .count();
        assert!(processing <= 1);
    }
    assert!(!editor.simulation().is_running());
}

#[test]
fn test_late_tick_catches_up() {
    let mut editor = editor_with_step();
    let t0 = Instant::now();
    editor.add_node(NodeKind::Action, "Second", "", flow_canvas::geometry::Point::ZERO);
    editor.run_simulation(t0);

    let transitions = editor.tick(t0 + test_step() * 10);
    assert_eq!(transitions.len(), 3);
    assert_eq!(statuses(editor.store()), vec![RunStatus::Success; 2]);
}

#[test]
fn test_deleting_current_node_mid_run() {
    let mut editor = editor_with_step();
    let t0 = Instant::now();
    editor.add_node(NodeKind::Action, "Second", "", flow_canvas::geometry::Point::ZERO);
    editor.run_simulation(t0);

    let current = editor.simulation().current().unwrap();
    editor.delete_node(current);
    editor.tick(t0 + test_step());

    assert_eq!(statuses(editor.store()), vec![RunStatus::Processing]);
    editor.tick(t0 + test_step() * 2);
    assert_eq!(statuses(editor.store()), vec![RunStatus::Success]);
}

#[test]
fn test_loading_blueprint_stops_run() {
    let mut editor = editor_with_step();
    editor.run_simulation(Instant::now());
    assert!(editor.simulation().is_running());

    editor
        .load_blueprint(flow_canvas::blueprint::find("appointment-reminder").unwrap())
        .unwrap();
    assert!(!editor.simulation().is_running());
    assert!(statuses(editor.store()).iter().all(|s| *s == RunStatus::Idle));
}

#[test]
fn test_plan_matches_runner() {
    let mut store = GraphBuilder::new()
        .node("A", NodeKind::Trigger, 0.0, 0.0)
        .node("B", NodeKind::Action, 300.0, 0.0)
        .build();
    let schedule = plan(store.nodes(), test_step());

    let mut runner = SimulationRunner::new(test_step());
    let t0 = Instant::now();
    let mut observed = runner.start(&mut store, t0);
    for entry in &schedule[1..] {
        observed.extend(runner.tick(&mut store, t0 + entry.at));
    }

    let expected: Vec<_> = schedule.iter().map(|s| (s.node, s.status)).collect();
    let actual: Vec<_> = observed.iter().map(|t| (t.node, t.status)).collect();
    assert_eq!(actual, expected);
}
