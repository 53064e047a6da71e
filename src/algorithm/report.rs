use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;
use std::time::Duration;

use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::FrontierMode;
use crate::NodeId;

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunState {
    /// Reset and waiting for `begin`
    Idle,
    /// Accepting `step` calls
    Running,
    /// Terminal until the next reset
    Finished,
}

/// Why a run finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinishReason {
    /// The end node was settled
    TargetReached,
    /// The frontier ran dry before the end node was settled
    FrontierExhausted,
    /// Only nodes at infinite distance remained
    Unreachable,
}

/// What a single `step` call did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepStatus {
    /// The engine was not running; nothing changed
    Inactive,
    /// One node was settled and the run continues
    Settled,
    /// This step ended the run
    Finished(FinishReason),
}

impl StepStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, StepStatus::Finished(_))
    }
}

/// Totals recorded when a run finishes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub mode: FrontierMode,
    pub reason: FinishReason,
    /// `distance[end]` is finite
    pub reachable: bool,
    /// Number of `step` calls made while running
    pub steps: usize,
    /// Successful relaxations
    pub relaxations: usize,
    /// Heap entries thrown away because their node was already settled
    pub stale_discarded: usize,
    /// Time from `begin` to the finishing step
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn elapsed_millis(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

/// One item of the frontier as a renderer should list it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontierEntry<W> {
    pub node: NodeId,
    pub distance: W,
    /// A heap entry left behind by a shorter relaxation or for a settled node
    pub stale: bool,
}

/// Read-only copy of the engine state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot<W> {
    pub state: RunState,
    pub mode: Option<FrontierMode>,
    pub start: NodeId,
    pub end: NodeId,
    /// Node settled by the most recent step
    pub current: Option<NodeId>,
    /// Tentative distances; unreached nodes hold infinity
    pub distances: BTreeMap<NodeId, W>,
    pub predecessors: BTreeMap<NodeId, Option<NodeId>>,
    pub visited: BTreeSet<NodeId>,
    /// Settled nodes in the order they were settled
    pub settle_order: Vec<NodeId>,
    pub frontier: Vec<FrontierEntry<W>>,
}

impl<W> EngineSnapshot<W>
where
    W: Float + Debug + Copy,
{
    /// Finite distance of a node, `None` if unreached or unknown
    pub fn distance(&self, node: &str) -> Option<W> {
        self.distances
            .get(node)
            .copied()
            .filter(|distance| distance.is_finite())
    }

    /// Whether the node has been settled
    pub fn is_visited(&self, node: &str) -> bool {
        self.visited.contains(node)
    }
}

/// Result of one `step` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult<W> {
    pub status: StepStatus,
    /// Node settled by this step, if any
    pub settled: Option<NodeId>,
    /// Present on the step that finished the run and on later observations
    pub summary: Option<RunSummary>,
    pub snapshot: EngineSnapshot<W>,
}

impl<W> StepResult<W> {
    pub fn is_inactive(&self) -> bool {
        self.status == StepStatus::Inactive
    }

    pub fn finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn reachable(&self) -> bool {
        self.summary.as_ref().map_or(false, |summary| summary.reachable)
    }

    pub fn elapsed_millis(&self) -> Option<f64> {
        self.summary.as_ref().map(RunSummary::elapsed_millis)
    }
}
