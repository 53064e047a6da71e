use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;
use std::time::Instant;

use log::{debug, info, trace, warn};
use num_traits::Float;

use crate::algorithm::report::{
    EngineSnapshot, FinishReason, RunState, RunSummary, StepResult, StepStatus,
};
use crate::algorithm::traits::{Frontier, FrontierMode, Selection};
use crate::graph::Graph;
use crate::{Error, NodeId, Result};

/// Dijkstra's algorithm driven one settled node per `step`
///
/// The engine borrows an immutable graph and owns every piece of mutable run
/// state. Callers observe it through [`StepEngine::snapshot`] and the results
/// returned by [`StepEngine::step`]; nothing outside the engine mutates it.
#[derive(Debug)]
pub struct StepEngine<'g, W, G>
where
    W: Float + Debug + Copy + Ord + 'static,
    G: Graph<W>,
{
    graph: &'g G,
    start: NodeId,
    end: NodeId,
    state: RunState,
    distances: BTreeMap<NodeId, W>,
    predecessors: BTreeMap<NodeId, Option<NodeId>>,
    visited: BTreeSet<NodeId>,
    settle_order: Vec<NodeId>,
    frontier: Option<Box<dyn Frontier<W>>>,
    current: Option<NodeId>,
    started_at: Option<Instant>,
    steps: usize,
    relaxations: usize,
    summary: Option<RunSummary>,
}

impl<'g, W, G> StepEngine<'g, W, G>
where
    W: Float + Debug + Copy + Ord + 'static,
    G: Graph<W>,
{
    /// Creates an engine in the `Idle` state
    ///
    /// Fails with [`Error::UnknownNode`] if `start` or `end` is not in the graph.
    pub fn new(graph: &'g G, start: &str, end: &str) -> Result<Self> {
        check_endpoints::<W, G>(graph, start, end)?;

        let mut engine = StepEngine {
            graph,
            start: start.to_string(),
            end: end.to_string(),
            state: RunState::Idle,
            distances: BTreeMap::new(),
            predecessors: BTreeMap::new(),
            visited: BTreeSet::new(),
            settle_order: Vec::new(),
            frontier: None,
            current: None,
            started_at: None,
            steps: 0,
            relaxations: 0,
            summary: None,
        };
        engine.reset();
        Ok(engine)
    }

    /// Abandons any run and returns to `Idle` with fresh tables
    pub fn reset(&mut self) {
        let zero = W::zero();
        self.distances = self
            .graph
            .nodes()
            .map(|node| {
                let distance = if node == self.start { zero } else { W::infinity() };
                (node.to_string(), distance)
            })
            .collect();
        self.predecessors = self.graph.nodes().map(|node| (node.to_string(), None)).collect();
        self.visited.clear();
        self.settle_order.clear();
        self.frontier = None;
        self.current = None;
        self.started_at = None;
        self.steps = 0;
        self.relaxations = 0;
        self.summary = None;
        self.state = RunState::Idle;
    }

    /// Points the engine at another graph and endpoints, then resets
    ///
    /// On error the previous graph, endpoints and run state are left untouched.
    pub fn reset_to(&mut self, graph: &'g G, start: &str, end: &str) -> Result<()> {
        check_endpoints::<W, G>(graph, start, end)?;
        self.graph = graph;
        self.start = start.to_string();
        self.end = end.to_string();
        self.reset();
        Ok(())
    }

    /// Starts a run with the given frontier strategy
    ///
    /// Only valid from `Idle`; a running or finished engine must be reset first.
    pub fn begin(&mut self, mode: FrontierMode) -> Result<()> {
        if self.state != RunState::Idle {
            warn!("begin({}) rejected while {:?}", mode, self.state);
            return Err(Error::InvalidState {
                expected: RunState::Idle,
                actual: self.state,
            });
        }

        self.frontier = Some(mode.build(self.graph, &self.start));
        self.started_at = Some(Instant::now());
        self.state = RunState::Running;
        debug!("run started from {} to {} using {}", self.start, self.end, mode);
        Ok(())
    }

    /// Settles at most one node and reports the resulting state
    ///
    /// Outside `Running` this is a no-op returning a [`StepStatus::Inactive`] result.
    pub fn step(&mut self) -> StepResult<W> {
        let status = self.advance();
        let settled = match status {
            StepStatus::Settled | StepStatus::Finished(FinishReason::TargetReached) => {
                self.current.clone()
            }
            _ => None,
        };
        let summary = if status.is_finished() {
            self.summary.clone()
        } else {
            None
        };

        StepResult {
            status,
            settled,
            summary,
            snapshot: self.snapshot(),
        }
    }

    /// Current state wrapped as a result that settled nothing
    ///
    /// Lets a shell reply with one shape whether or not a step ran. Once the
    /// run has finished the summary is carried along.
    pub fn observe(&self) -> StepResult<W> {
        StepResult {
            status: StepStatus::Inactive,
            settled: None,
            summary: self.summary.clone(),
            snapshot: self.snapshot(),
        }
    }

    /// Does the work of one `step` without building a snapshot
    pub fn advance(&mut self) -> StepStatus {
        if self.state != RunState::Running {
            trace!("step ignored while {:?}", self.state);
            return StepStatus::Inactive;
        }
        let Some(frontier) = self.frontier.as_mut() else {
            return StepStatus::Inactive;
        };
        self.steps += 1;

        let selection = frontier.pop_min_unvisited(&self.distances, &self.visited);
        let (node, node_distance) = match selection {
            Selection::Settle(node, distance) => (node, distance),
            Selection::Exhausted => return self.finish(FinishReason::FrontierExhausted),
            Selection::Unreachable => return self.finish(FinishReason::Unreachable),
        };
        if node_distance.is_infinite() {
            return self.finish(FinishReason::Unreachable);
        }

        debug!("settled {} at {:?}", node, node_distance);
        self.visited.insert(node.clone());
        self.settle_order.push(node.clone());
        self.current = Some(node.clone());

        if node == self.end {
            return self.finish(FinishReason::TargetReached);
        }

        self.relax(&node, node_distance);
        StepStatus::Settled
    }

    /// Steps until the run finishes and returns the finishing result
    ///
    /// Begins nothing: the engine must already be `Running`.
    pub fn run_to_completion(&mut self) -> Result<StepResult<W>> {
        if self.state != RunState::Running {
            return Err(Error::InvalidState {
                expected: RunState::Running,
                actual: self.state,
            });
        }
        // One extra step covers the final empty selection
        for _ in 0..=self.graph.node_count() {
            if self.advance().is_finished() {
                break;
            }
        }

        let summary = self.summary.clone();
        let status = summary
            .as_ref()
            .map_or(StepStatus::Inactive, |summary| StepStatus::Finished(summary.reason));
        let settled = match status {
            StepStatus::Finished(FinishReason::TargetReached) => self.current.clone(),
            _ => None,
        };
        Ok(StepResult {
            status,
            settled,
            summary,
            snapshot: self.snapshot(),
        })
    }

    /// Shortest path from start to end along predecessor links
    ///
    /// `None` when the end is unreached or its chain does not lead back to the
    /// start within `|V|` hops. Before the run finishes this reflects the
    /// tentative tree.
    pub fn current_path(&self) -> Option<Vec<NodeId>> {
        if self.distance_or_infinity(&self.end).is_infinite() {
            return None;
        }

        let mut path = vec![self.end.clone()];
        let mut node = &self.end;
        for _ in 0..self.graph.node_count() {
            if *node == self.start {
                path.reverse();
                return Some(path);
            }
            node = self.predecessors.get(node)?.as_ref()?;
            path.push(node.clone());
        }

        if *node == self.start {
            path.reverse();
            return Some(path);
        }
        None
    }

    /// Distance to the end node when finite
    pub fn path_cost(&self) -> Option<W> {
        self.distance(&self.end)
    }

    /// Finite tentative distance of a node
    pub fn distance(&self, node: &str) -> Option<W> {
        self.distances
            .get(node)
            .copied()
            .filter(|distance| distance.is_finite())
    }

    /// Copies the current run state into a serializable view
    pub fn snapshot(&self) -> EngineSnapshot<W> {
        EngineSnapshot {
            state: self.state,
            mode: self.mode(),
            start: self.start.clone(),
            end: self.end.clone(),
            current: self.current.clone(),
            distances: self.distances.clone(),
            predecessors: self.predecessors.clone(),
            visited: self.visited.clone(),
            settle_order: self.settle_order.clone(),
            frontier: self
                .frontier
                .as_ref()
                .map(|frontier| frontier.entries(&self.distances, &self.visited))
                .unwrap_or_default(),
        }
    }

    /// Lifecycle state: `Idle`, `Running` or `Finished`
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Strategy of the current run; `None` while `Idle`
    pub fn mode(&self) -> Option<FrontierMode> {
        self.frontier.as_ref().map(|frontier| frontier.mode())
    }

    /// The graph being searched
    pub fn graph(&self) -> &'g G {
        self.graph
    }

    /// Start node
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Target node
    pub fn end(&self) -> &str {
        &self.end
    }

    /// Node settled by the latest step
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Nodes settled so far
    pub fn visited(&self) -> &BTreeSet<NodeId> {
        &self.visited
    }

    /// Tentative distance of every node, infinite when unreached
    pub fn distances(&self) -> &BTreeMap<NodeId, W> {
        &self.distances
    }

    /// Predecessor of every node on its best known path
    pub fn predecessors(&self) -> &BTreeMap<NodeId, Option<NodeId>> {
        &self.predecessors
    }

    /// Totals of the last finished run
    pub fn summary(&self) -> Option<&RunSummary> {
        self.summary.as_ref()
    }

    fn relax(&mut self, node: &str, node_distance: W) {
        let graph = self.graph;
        // `node` was taken from this graph, so the lookup cannot fail
        let neighbors = graph.neighbors(node).into_iter().flatten();

        for (neighbor, weight) in neighbors {
            if self.visited.contains(neighbor) {
                continue;
            }
            let candidate = node_distance + weight;
            if candidate < self.distance_or_infinity(neighbor) {
                trace!("relaxed {} -> {}: {:?}", node, neighbor, candidate);
                self.distances.insert(neighbor.to_string(), candidate);
                self.predecessors
                    .insert(neighbor.to_string(), Some(node.to_string()));
                if let Some(frontier) = self.frontier.as_mut() {
                    frontier.insert_or_update(neighbor, candidate);
                }
                self.relaxations += 1;
            }
        }
    }

    fn finish(&mut self, reason: FinishReason) -> StepStatus {
        let elapsed = self
            .started_at
            .map(|started| started.elapsed())
            .unwrap_or_default();
        let reachable = self.distance_or_infinity(&self.end).is_finite();
        let (mode, stale_discarded) = match self.frontier.as_ref() {
            Some(frontier) => (frontier.mode(), frontier.stale_discarded()),
            None => (FrontierMode::PriorityQueue, 0),
        };

        self.state = RunState::Finished;
        self.summary = Some(RunSummary {
            mode,
            reason,
            reachable,
            steps: self.steps,
            relaxations: self.relaxations,
            stale_discarded,
            elapsed,
        });
        info!(
            "{} run finished ({:?}) after {} steps in {:.3} ms, reachable: {}",
            mode,
            reason,
            self.steps,
            elapsed.as_secs_f64() * 1000.0,
            reachable
        );
        StepStatus::Finished(reason)
    }

    fn distance_or_infinity(&self, node: &str) -> W {
        self.distances.get(node).copied().unwrap_or_else(W::infinity)
    }
}

fn check_endpoints<W, G>(graph: &G, start: &str, end: &str) -> Result<()>
where
    W: Float + Debug + Copy,
    G: Graph<W> + ?Sized,
{
    for node in [start, end] {
        if !graph.has_node(node) {
            return Err(Error::UnknownNode(node.to_string()));
        }
    }
    Ok(())
}
