//! Cosmetic execution pass over the graph.
//!
//! The runner walks nodes in store order (not along edges), marking each one
//! `Processing` for one interval and then `Success`. It has no data flow, no
//! branching and no error propagation.
//!
//! Waiting is cooperative: the UI loop calls [`SimulationRunner::tick`] with
//! the current time and the runner applies whatever transitions fell due.
//! Starting a new run or calling [`SimulationRunner::cancel`] drops the
//! pending continuation.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::graph::{GraphStore, Node, NodeId, RunStatus};

/// Default time each node spends in `Processing`.
pub const DEFAULT_STEP_INTERVAL: Duration = Duration::from_millis(800);

/// A status change applied to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTransition {
    pub node: NodeId,
    pub status: RunStatus,
}

/// A status change together with its offset from the start of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTransition {
    pub at: Duration,
    pub node: NodeId,
    pub status: RunStatus,
}

/// The full transition sequence a run over `nodes` produces.
pub fn plan(nodes: &[Node], interval: Duration) -> Vec<ScheduledTransition> {
    let mut at = Duration::ZERO;
    let mut transitions = Vec::with_capacity(nodes.len() * 2);
    for node in nodes {
        transitions.push(ScheduledTransition {
            at,
            node: node.id,
            status: RunStatus::Processing,
        });
        at += interval;
        transitions.push(ScheduledTransition {
            at,
            node: node.id,
            status: RunStatus::Success,
        });
    }
    transitions
}

/// Drives one simulation run at a time.
#[derive(Debug, Clone)]
pub struct SimulationRunner {
    interval: Duration,
    pending: VecDeque<NodeId>,
    current: Option<NodeId>,
    /// When `current` completes.
    deadline: Option<Instant>,
}

impl Default for SimulationRunner {
    fn default() -> Self {
        Self::new(DEFAULT_STEP_INTERVAL)
    }
}

impl SimulationRunner {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: VecDeque::new(),
            current: None,
            deadline: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.current.is_some()
    }

    /// Node currently marked `Processing`.
    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    /// When the next transition is due, for scheduling a repaint.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Reset every node to `Idle` and begin a run at `now`.
    ///
    /// An active run is abandoned.
    pub fn start(&mut self, store: &mut GraphStore, now: Instant) -> Vec<StatusTransition> {
        self.cancel();
        store.reset_run_status();
        self.pending = store.nodes().iter().map(|n| n.id).collect();
        info!(nodes = self.pending.len(), "Simulation started");

        let mut transitions = Vec::new();
        self.begin_next(store, now, &mut transitions);
        transitions
    }

    /// Apply every transition due at `now`.
    pub fn tick(&mut self, store: &mut GraphStore, now: Instant) -> Vec<StatusTransition> {
        let mut transitions = Vec::new();
        while let (Some(node), Some(deadline)) = (self.current, self.deadline) {
            if now < deadline {
                break;
            }
            if store.set_run_status(node, RunStatus::Success) {
                transitions.push(StatusTransition {
                    node,
                    status: RunStatus::Success,
                });
            }
            self.current = None;
            self.deadline = None;
            self.begin_next(store, deadline, &mut transitions);
        }
        transitions
    }

    /// Stop the run, leaving statuses as they are.
    pub fn cancel(&mut self) {
        if self.is_running() {
            debug!("Simulation cancelled");
        }
        self.pending.clear();
        self.current = None;
        self.deadline = None;
    }

    /// Mark the next still-existing node `Processing`, starting at `from`.
    fn begin_next(&mut self, store: &mut GraphStore, from: Instant, out: &mut Vec<StatusTransition>) {
        while let Some(node) = self.pending.pop_front() {
            if store.set_run_status(node, RunStatus::Processing) {
                out.push(StatusTransition {
                    node,
                    status: RunStatus::Processing,
                });
                self.current = Some(node);
                self.deadline = Some(from + self.interval);
                return;
            }
            debug!(%node, "Skipping node removed during simulation");
        }
        info!("Simulation finished");
    }
}
